//! Playback Context - 音频与经节同步
//!
//! - verse_mapping: 播放位置 → 经节号
//! - speed: 倍速档位
//! - events: 同步器输出的事件与媒体指令
//! - synchronizer: 真实音频 / 模拟计时两种模式的状态机

mod events;
mod speed;
mod synchronizer;
mod verse_mapping;

pub use events::{MediaCommand, PlaybackEvent, PlaybackInput};
pub use speed::PlaybackSpeed;
pub use synchronizer::{
    PlaybackError, PlaybackSettings, PlaybackSnapshot, PlaybackState,
    PlaybackSynchronizer,
};
pub use verse_mapping::{format_time, verse_for_position};
