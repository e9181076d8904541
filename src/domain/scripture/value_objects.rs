//! Scripture Context - Value Objects

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChapterIdError {
    #[error("无效的章节 ID: {0}")]
    Malformed(String),
}

/// 章节标识，形如 `JHN.1`（书卷 ID + 章号）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChapterId {
    book_id: String,
    number: u32,
}

impl ChapterId {
    pub fn new(book_id: impl Into<String>, number: u32) -> Result<Self, ChapterIdError> {
        let book_id = book_id.into();
        if book_id.is_empty() || number == 0 {
            return Err(ChapterIdError::Malformed(format!("{}.{}", book_id, number)));
        }
        Ok(Self { book_id, number })
    }

    pub fn parse(raw: &str) -> Result<Self, ChapterIdError> {
        let (book, number) = raw
            .rsplit_once('.')
            .ok_or_else(|| ChapterIdError::Malformed(raw.to_string()))?;
        let number = number
            .parse::<u32>()
            .map_err(|_| ChapterIdError::Malformed(raw.to_string()))?;
        Self::new(book, number).map_err(|_| ChapterIdError::Malformed(raw.to_string()))
    }

    /// 上一章；第一章没有上一章
    pub fn previous(&self) -> Option<Self> {
        (self.number > 1).then(|| Self {
            book_id: self.book_id.clone(),
            number: self.number - 1,
        })
    }

    /// 下一章；到达书卷最后一章时没有下一章
    pub fn next(&self, chapter_count: u32) -> Option<Self> {
        (self.number < chapter_count).then(|| Self {
            book_id: self.book_id.clone(),
            number: self.number + 1,
        })
    }
}

impl std::fmt::Display for ChapterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.book_id, self.number)
    }
}

impl TryFrom<String> for ChapterId {
    type Error = ChapterIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ChapterId> for String {
    fn from(id: ChapterId) -> Self {
        id.to_string()
    }
}
