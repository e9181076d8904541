//! Worker Layer - Background Task Processing
//!
//! 实现 PlaybackTimer，驱动无音频章节的模拟播放

mod playback_timer;

pub use playback_timer::{PlaybackTimer, SharedSynchronizer};
