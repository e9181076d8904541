//! API.Bible Client - ScriptureProviderPort 实现
//!
//! 所有读取经过 CachedFetcher，缓存 key 为逻辑资源标识:
//! - bibles
//! - books:{bible}
//! - chapters:{bible}:{book}
//! - chapter:{bible}:{chapter}
//! - verses:{bible}:{chapter}
//! - audio:{bible}:{chapter}:{md5(url)}（每个候选端点各自一个 key）

use async_trait::async_trait;
use std::sync::Arc;

use super::audio_normalizer::normalize_chapter_audio;
use super::cached_fetcher::CachedFetcher;
use crate::application::ports::{
    generate_audio_cache_key, FetchCachePort, FetchError, ScriptureProviderPort,
    ScriptureTransportPort,
};
use crate::domain::scripture::{Bible, Book, Chapter, ChapterAudio, ChapterContent, VerseSummary};

/// 章节正文固定查询参数
const CHAPTER_CONTENT_QUERY: &str = "content-type=html\
&include-notes=false\
&include-titles=true\
&include-chapter-numbers=false\
&include-verse-numbers=true\
&include-verse-spans=true";

/// 客户端配置
#[derive(Debug, Clone)]
pub struct ApiBibleClientConfig {
    /// 上游 Base URL，如 `https://api.scripture.api.bible/v1/`
    pub base_url: String,
}

impl Default for ApiBibleClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.scripture.api.bible/v1/".to_string(),
        }
    }
}

impl ApiBibleClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

/// 经文 API 客户端
pub struct ApiBibleClient {
    fetcher: CachedFetcher,
    base_url: String,
}

impl ApiBibleClient {
    pub fn new(
        config: ApiBibleClientConfig,
        transport: Arc<dyn ScriptureTransportPort>,
        cache: Arc<dyn FetchCachePort>,
    ) -> Self {
        let mut base_url = config.base_url;
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            fetcher: CachedFetcher::new(transport, cache),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 章节音频候选端点（按优先级）
    fn audio_candidates(&self, bible_id: &str, chapter_id: &str) -> Vec<String> {
        vec![
            self.url(&format!("bibles/{}/chapters/{}/audio", bible_id, chapter_id)),
            self.url(&format!("audio-bibles/{}/chapters/{}", bible_id, chapter_id)),
            self.url(&format!("bibles/{}/audio/chapters/{}", bible_id, chapter_id)),
        ]
    }
}

#[async_trait]
impl ScriptureProviderPort for ApiBibleClient {
    async fn bibles(&self) -> Result<Vec<Bible>, FetchError> {
        self.fetcher.fetch_as(&self.url("bibles"), "bibles").await
    }

    async fn books(&self, bible_id: &str) -> Result<Vec<Book>, FetchError> {
        self.fetcher
            .fetch_as(
                &self.url(&format!("bibles/{}/books", bible_id)),
                &format!("books:{}", bible_id),
            )
            .await
    }

    async fn chapters(&self, bible_id: &str, book_id: &str) -> Result<Vec<Chapter>, FetchError> {
        self.fetcher
            .fetch_as(
                &self.url(&format!("bibles/{}/books/{}/chapters", bible_id, book_id)),
                &format!("chapters:{}:{}", bible_id, book_id),
            )
            .await
    }

    async fn chapter(&self, bible_id: &str, chapter_id: &str) -> Result<ChapterContent, FetchError> {
        self.fetcher
            .fetch_as(
                &self.url(&format!(
                    "bibles/{}/chapters/{}?{}",
                    bible_id, chapter_id, CHAPTER_CONTENT_QUERY
                )),
                &format!("chapter:{}:{}", bible_id, chapter_id),
            )
            .await
    }

    async fn verses(
        &self,
        bible_id: &str,
        chapter_id: &str,
    ) -> Result<Vec<VerseSummary>, FetchError> {
        self.fetcher
            .fetch_as(
                &self.url(&format!("bibles/{}/chapters/{}/verses", bible_id, chapter_id)),
                &format!("verses:{}:{}", bible_id, chapter_id),
            )
            .await
    }

    async fn chapter_audio(&self, bible_id: &str, chapter_id: &str) -> Option<ChapterAudio> {
        for url in self.audio_candidates(bible_id, chapter_id) {
            let key = generate_audio_cache_key(bible_id, chapter_id, &url);
            let payload = match self.fetcher.fetch_with_cache(&url, &key).await {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::debug!(url = %url, error = %e, "Audio candidate failed");
                    continue;
                }
            };

            match normalize_chapter_audio(&payload, chapter_id) {
                Some(audio) => {
                    tracing::info!(
                        chapter_id = %chapter_id,
                        url = %url,
                        duration = audio.duration,
                        "Chapter audio resolved"
                    );
                    return Some(audio);
                }
                None => {
                    tracing::debug!(url = %url, "Audio candidate has no stream URL");
                }
            }
        }

        tracing::debug!(bible_id = %bible_id, chapter_id = %chapter_id, "No chapter audio available");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::ManualClock;
    use crate::infrastructure::adapters::provider::FakeTransport;
    use crate::infrastructure::memory::InMemoryFetchCache;
    use chrono::Duration;
    use serde_json::json;

    const BASE: &str = "https://api.example/v1";

    fn client(transport: Arc<FakeTransport>) -> (ApiBibleClient, Arc<InMemoryFetchCache>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let cache = Arc::new(InMemoryFetchCache::with_clock(Duration::minutes(5), clock.clone()));
        let client = ApiBibleClient::new(ApiBibleClientConfig::new(BASE), transport, cache.clone());
        (client, cache, clock)
    }

    fn candidates() -> [String; 3] {
        [
            format!("{}/bibles/b1/chapters/JHN.1/audio", BASE),
            format!("{}/audio-bibles/b1/chapters/JHN.1", BASE),
            format!("{}/bibles/b1/audio/chapters/JHN.1", BASE),
        ]
    }

    #[tokio::test]
    async fn test_books_cached_by_logical_key() {
        let url = format!("{}/bibles/b1/books", BASE);
        let transport = Arc::new(FakeTransport::new().with_response(
            url.clone(),
            json!({"data": [{"id": "GEN", "bibleId": "b1", "name": "Genesis", "abbreviation": "Gen", "nameLong": "The First Book of Moses"}]}),
        ));
        let (client, cache, clock) = client(transport.clone());

        let books = client.books("b1").await.unwrap();
        assert_eq!(books[0].name, "Genesis");
        client.books("b1").await.unwrap();
        assert_eq!(transport.call_count(&url), 1);
        assert!(cache.contains_fresh("books:b1"));

        clock.advance(Duration::minutes(6));
        client.books("b1").await.unwrap();
        assert_eq!(transport.call_count(&url), 2);
    }

    #[tokio::test]
    async fn test_chapter_request_uses_fixed_query() {
        let url = format!("{}/bibles/b1/chapters/JHN.1?{}", BASE, CHAPTER_CONTENT_QUERY);
        let transport = Arc::new(FakeTransport::new().with_response(
            url.clone(),
            json!({"data": {"id": "JHN.1", "bookId": "JHN", "reference": "John 1", "content": "<p/>", "verseCount": 51}}),
        ));
        let (client, _, _) = client(transport.clone());

        let content = client.chapter("b1", "JHN.1").await.unwrap();
        assert_eq!(content.verse_count, 51);
        assert!(url.contains("include-verse-spans=true"));
        assert!(url.contains("include-notes=false"));
        assert_eq!(transport.calls(), vec![url]);
    }

    #[tokio::test]
    async fn test_chapter_failure_propagates() {
        let (client, cache, _) = client(Arc::new(FakeTransport::new()));
        let err = client.chapter("b1", "JHN.1").await.unwrap_err();
        assert_eq!(err, FetchError::Provider { status: 404 });
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_audio_probes_until_usable_candidate() {
        let [first, second, third] = candidates();
        let transport = Arc::new(
            FakeTransport::new()
                .with_error(first.clone(), FetchError::Provider { status: 404 })
                .with_error(second.clone(), FetchError::Provider { status: 500 })
                .with_response(third.clone(), json!({"data": {"streamUrl": "x", "duration": 120}})),
        );
        let (client, cache, _) = client(transport.clone());

        let audio = client.chapter_audio("b1", "JHN.1").await.unwrap();
        assert_eq!(audio.url, "x");
        assert_eq!(audio.duration, 120.0);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains_fresh(&generate_audio_cache_key("b1", "JHN.1", &third)));
        assert_eq!(transport.calls(), vec![first, second, third]);
    }

    #[tokio::test]
    async fn test_audio_skips_candidate_without_url() {
        let [first, second, _] = candidates();
        let transport = Arc::new(
            FakeTransport::new()
                .with_response(first.clone(), json!({"data": {"duration": 90}}))
                .with_response(second.clone(), json!({"data": {"resourceUrl": "https://cdn/y.mp3"}})),
        );
        let (client, _, _) = client(transport.clone());

        let audio = client.chapter_audio("b1", "JHN.1").await.unwrap();
        assert_eq!(audio.url, "https://cdn/y.mp3");
        assert_eq!(transport.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_audio_absent_when_all_candidates_fail() {
        let [first, second, third] = candidates();
        let transport = Arc::new(
            FakeTransport::new()
                .with_error(first, FetchError::Network("refused".to_string()))
                .with_error(second, FetchError::Decode("bad json".to_string()))
                .with_response(third, json!({"data": {"streamUrl": ""}})),
        );
        let (client, _, _) = client(transport.clone());

        assert!(client.chapter_audio("b1", "JHN.1").await.is_none());
        assert_eq!(transport.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_resolved_audio_served_from_cache() {
        let [first, _, _] = candidates();
        let transport = Arc::new(
            FakeTransport::new().with_response(first.clone(), json!({"data": {"url": "https://cdn/z.mp3"}})),
        );
        let (client, _, _) = client(transport.clone());

        client.chapter_audio("b1", "JHN.1").await.unwrap();
        client.chapter_audio("b1", "JHN.1").await.unwrap();
        assert_eq!(transport.call_count(&first), 1);
    }
}
