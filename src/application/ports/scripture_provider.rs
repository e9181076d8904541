//! Scripture Provider Port - 经文数据来源
//!
//! 所有读取都经过 Fetch Cache；主要内容的失败向上返回，
//! 音频查找吞掉所有失败并以 `None` 表示无音频

use async_trait::async_trait;

use super::scripture_transport::FetchError;
use crate::domain::scripture::{Bible, Book, Chapter, ChapterAudio, ChapterContent, VerseSummary};

#[async_trait]
pub trait ScriptureProviderPort: Send + Sync {
    /// 可用译本列表
    async fn bibles(&self) -> Result<Vec<Bible>, FetchError>;

    /// 译本的书卷列表
    async fn books(&self, bible_id: &str) -> Result<Vec<Book>, FetchError>;

    /// 书卷的章节列表
    async fn chapters(&self, bible_id: &str, book_id: &str) -> Result<Vec<Chapter>, FetchError>;

    /// 章节正文
    async fn chapter(&self, bible_id: &str, chapter_id: &str) -> Result<ChapterContent, FetchError>;

    /// 章节经节列表
    async fn verses(&self, bible_id: &str, chapter_id: &str)
        -> Result<Vec<VerseSummary>, FetchError>;

    /// 章节音频；找不到可播放地址时为 `None`，不是错误
    async fn chapter_audio(&self, bible_id: &str, chapter_id: &str) -> Option<ChapterAudio>;
}
