//! Domain Layer - 领域层
//!
//! 包含三个限界上下文:
//! - Scripture Context: 译本、书卷、章节与章节音频
//! - Playback Context: 播放位置与经节同步
//! - Notes Context: 经文笔记

pub mod notes;
pub mod playback;
pub mod scripture;
