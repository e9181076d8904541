//! Scripture Provider Adapters
//!
//! - http_transport: reqwest 实现的上游传输（带 api-key 头）
//! - fake_transport: 脚本化响应的传输，用于测试与离线调试
//! - cached_fetcher: Fetch Cache 前置的获取器，拆解 `data` 信封
//! - audio_normalizer: 异构音频负载 → ChapterAudio
//! - api_bible_client: ScriptureProviderPort 实现与音频端点探测

mod api_bible_client;
mod audio_normalizer;
mod cached_fetcher;
mod fake_transport;
mod http_transport;

pub use api_bible_client::{ApiBibleClient, ApiBibleClientConfig};
pub use audio_normalizer::normalize_chapter_audio;
pub use cached_fetcher::CachedFetcher;
pub use fake_transport::FakeTransport;
pub use http_transport::{HttpTransport, HttpTransportConfig};
