//! Playback Commands - 播放控制命令

use crate::domain::playback::{PlaybackInput, PlaybackSnapshot};

/// 打开章节播放
///
/// 带 `session_id` 时复用已有会话并切换章节
#[derive(Debug, Clone)]
pub struct OpenPlayback {
    pub session_id: Option<String>,
    pub bible_id: String,
    pub chapter_id: String,
    pub verse_count: Option<u32>,
}

/// 打开播放响应
#[derive(Debug, Clone)]
pub struct OpenPlaybackResponse {
    pub session_id: String,
    pub reference: String,
    pub snapshot: PlaybackSnapshot,
}

/// 用户控制或媒体元素通知
#[derive(Debug, Clone)]
pub struct ControlPlayback {
    pub session_id: String,
    pub input: PlaybackInput,
}

/// 关闭播放会话
#[derive(Debug, Clone)]
pub struct ClosePlayback {
    pub session_id: String,
}
