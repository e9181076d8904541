//! Playback 事件、输入与媒体指令

use serde::{Deserialize, Serialize};

/// 发往浏览器媒体元素的指令（真实音频模式）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum MediaCommand {
    Play,
    Pause,
    SetCurrentTime { seconds: f64 },
    SetPlaybackRate { rate: f64 },
}

/// 同步器产生的事件
///
/// 事件先进入同步器的 outbox，由所属会话在操作结束后统一发布
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum PlaybackEvent {
    /// 当前经节变化
    VerseChanged { verse: u32, total_verses: u32 },
    /// 播放进度
    Progress { position: f64, duration: f64 },
    /// 播放/暂停、时长或倍速变化
    StateChanged {
        is_playing: bool,
        position: f64,
        duration: f64,
        speed: f64,
    },
    /// 需要浏览器端媒体元素执行的指令
    Media(MediaCommand),
    /// 会话关闭
    Closed { reason: String },
}

/// 外部输入：用户控制与媒体元素原生通知
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackInput {
    TogglePlay,
    /// 进度条点击，`fraction` ∈ [0, 1]
    Seek { fraction: f64 },
    SkipBack,
    SkipForward,
    CycleSpeed,
    TimeUpdate { current_time: f64 },
    Ended,
    MetadataLoaded { duration: Option<f64> },
}
