//! Playback Session Port - 播放会话生命周期
//!
//! 每个会话持有一个同步器；模拟计时器与事件发布由具体实现负责

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::playback::{PlaybackError, PlaybackInput, PlaybackSnapshot};
use crate::domain::scripture::ChapterAudio;

/// Playback Session 错误
#[derive(Debug, Error)]
pub enum PlaybackSessionError {
    #[error("Playback session not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

/// 打开会话所需的章节信息
#[derive(Debug, Clone)]
pub struct PlaybackChapter {
    pub bible_id: String,
    pub chapter_id: String,
    pub reference: String,
    pub verse_count: Option<u32>,
    pub audio: Option<ChapterAudio>,
}

#[async_trait]
pub trait PlaybackSessionPort: Send + Sync {
    /// 为章节创建会话，返回会话 ID 与初始快照
    async fn open(&self, chapter: PlaybackChapter) -> (String, PlaybackSnapshot);

    /// 会话切换到新章节：停止旧计时器，按新章节重建同步器
    async fn change_chapter(
        &self,
        session_id: &str,
        chapter: PlaybackChapter,
    ) -> Result<PlaybackSnapshot, PlaybackSessionError>;

    /// 应用一次输入，返回最新快照
    async fn apply(
        &self,
        session_id: &str,
        input: PlaybackInput,
    ) -> Result<PlaybackSnapshot, PlaybackSessionError>;

    async fn snapshot(&self, session_id: &str) -> Result<PlaybackSnapshot, PlaybackSessionError>;

    /// 关闭会话并停止计时器
    async fn close(&self, session_id: &str) -> Result<(), PlaybackSessionError>;

    fn is_valid(&self, session_id: &str) -> bool;
}
