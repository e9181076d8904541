//! Scripture Context - Entities
//!
//! 上游经文 API 返回的数据结构（`data` 信封内部的负载）

use serde::{Deserialize, Serialize};

/// 译本语言
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibleLanguage {
    pub id: String,
    pub name: String,
}

/// 译本
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bible {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub abbreviation: String,
    pub language: BibleLanguage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// 书卷
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bible_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub name_long: String,
}

/// 章节目录项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub book_id: String,
    pub number: String,
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

/// 相邻章节链接
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterLink {
    pub id: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub book_id: String,
}

/// 章节正文（HTML）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterContent {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    pub book_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    pub reference: String,
    pub content: String,
    #[serde(default)]
    pub verse_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<ChapterLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<ChapterLink>,
}

/// 经节目录项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseSummary {
    pub id: String,
    #[serde(default)]
    pub org_id: String,
    pub book_id: String,
    pub chapter_id: String,
    pub reference: String,
}
