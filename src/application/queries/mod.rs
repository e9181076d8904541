//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：处理所有读操作

mod note_queries;
mod playback_queries;
mod scripture_queries;

pub mod handlers;

pub use note_queries::*;
pub use playback_queries::*;
pub use scripture_queries::*;
