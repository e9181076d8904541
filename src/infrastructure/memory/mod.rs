//! Memory Layer - In-Memory State Management
//!
//! 实现 Fetch Cache、笔记本与播放会话的内存状态

mod fetch_cache;
mod note_ledger;
mod playback_sessions;

pub use fetch_cache::InMemoryFetchCache;
pub use note_ledger::InMemoryNoteLedger;
pub use playback_sessions::InMemoryPlaybackSessions;
