//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod clock;
mod fetch_cache;
mod note_store;
mod playback_sessions;
mod scripture_provider;
mod scripture_transport;

pub use clock::{Clock, SystemClock};
#[cfg(test)]
pub use clock::ManualClock;
pub use fetch_cache::{generate_audio_cache_key, CacheStats, FetchCachePort};
pub use note_store::{NoteLedgerPort, NoteStorePort, StoreError};
pub use playback_sessions::{PlaybackChapter, PlaybackSessionError, PlaybackSessionPort};
pub use scripture_provider::ScriptureProviderPort;
pub use scripture_transport::{FetchError, ScriptureTransportPort};
