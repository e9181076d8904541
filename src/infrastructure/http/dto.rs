//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::domain::playback::PlaybackSnapshot;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(Empty {}),
        }
    }
}

// ============================================================================
// Scripture DTOs
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ListBooksRequest {
    #[serde(default)]
    pub bible_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListChaptersRequest {
    #[serde(default)]
    pub bible_id: Option<String>,
    pub book_id: String,
}

#[derive(Debug, Deserialize)]
pub struct GetChapterRequest {
    #[serde(default)]
    pub bible_id: Option<String>,
    pub chapter_id: String,
    #[serde(default)]
    pub chapter_count: Option<u32>,
}

/// 章节级请求（经节列表、音频）
#[derive(Debug, Deserialize)]
pub struct ChapterRequest {
    #[serde(default)]
    pub bible_id: Option<String>,
    pub chapter_id: String,
}

// ============================================================================
// Note DTOs
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ListNotesRequest {
    #[serde(default)]
    pub verse_reference: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddNoteRequest {
    pub verse_reference: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteNoteRequest {
    pub id: String,
}

// ============================================================================
// Playback DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct OpenPlaybackRequest {
    /// 已有会话时切换章节
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub bible_id: Option<String>,
    pub chapter_id: String,
    #[serde(default)]
    pub verse_count: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct OpenPlaybackResponseDto {
    pub session_id: String,
    pub reference: String,
    pub playback: PlaybackSnapshot,
}

#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SeekRequest {
    pub session_id: String,
    /// 进度条点击比例 [0, 1]
    pub fraction: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipDirection {
    Back,
    Forward,
}

#[derive(Debug, Deserialize)]
pub struct SkipRequest {
    pub session_id: String,
    pub direction: SkipDirection,
}

/// 浏览器媒体元素通知类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaEventKind {
    TimeUpdate,
    Ended,
    MetadataLoaded,
}

#[derive(Debug, Deserialize)]
pub struct MediaEventRequest {
    pub session_id: String,
    pub kind: MediaEventKind,
    #[serde(default)]
    pub current_time: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct PlaybackResponseDto {
    pub session_id: String,
    pub playback: PlaybackSnapshot,
}
