//! Scripture Query Handlers

use serde::Serialize;
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::ScriptureProviderPort;
use crate::application::queries::{
    GetChapter, GetChapterAudio, ListBibles, ListBooks, ListChapters, ListVerses,
};
use crate::domain::scripture::{
    Bible, Book, Chapter, ChapterAudio, ChapterContent, ChapterId, VerseSummary,
};

// ============================================================================
// Response DTOs
// ============================================================================

/// 章节正文 + 前后章导航
#[derive(Debug, Clone, Serialize)]
pub struct ChapterResponse {
    pub content: ChapterContent,
    pub previous_chapter_id: Option<String>,
    pub next_chapter_id: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// ListBibles Handler
pub struct ListBiblesHandler {
    provider: Arc<dyn ScriptureProviderPort>,
}

impl ListBiblesHandler {
    pub fn new(provider: Arc<dyn ScriptureProviderPort>) -> Self {
        Self { provider }
    }

    pub async fn handle(&self, _query: ListBibles) -> Result<Vec<Bible>, ApplicationError> {
        Ok(self.provider.bibles().await?)
    }
}

/// ListBooks Handler
pub struct ListBooksHandler {
    provider: Arc<dyn ScriptureProviderPort>,
}

impl ListBooksHandler {
    pub fn new(provider: Arc<dyn ScriptureProviderPort>) -> Self {
        Self { provider }
    }

    pub async fn handle(&self, query: ListBooks) -> Result<Vec<Book>, ApplicationError> {
        Ok(self.provider.books(&query.bible_id).await?)
    }
}

/// ListChapters Handler
pub struct ListChaptersHandler {
    provider: Arc<dyn ScriptureProviderPort>,
}

impl ListChaptersHandler {
    pub fn new(provider: Arc<dyn ScriptureProviderPort>) -> Self {
        Self { provider }
    }

    pub async fn handle(&self, query: ListChapters) -> Result<Vec<Chapter>, ApplicationError> {
        if query.book_id.trim().is_empty() {
            return Err(ApplicationError::validation("book_id cannot be empty"));
        }
        Ok(self
            .provider
            .chapters(&query.bible_id, &query.book_id)
            .await?)
    }
}

/// GetChapter Handler
///
/// 相邻章节优先使用上游给出的链接，否则按 `BOOK.N` 推算
pub struct GetChapterHandler {
    provider: Arc<dyn ScriptureProviderPort>,
}

impl GetChapterHandler {
    pub fn new(provider: Arc<dyn ScriptureProviderPort>) -> Self {
        Self { provider }
    }

    pub async fn handle(&self, query: GetChapter) -> Result<ChapterResponse, ApplicationError> {
        if query.chapter_id.trim().is_empty() {
            return Err(ApplicationError::validation("chapter_id cannot be empty"));
        }

        let content = self
            .provider
            .chapter(&query.bible_id, &query.chapter_id)
            .await?;

        // 书卷简介（如 `GEN.intro`）没有章号，只能使用上游链接
        let chapter_id = ChapterId::parse(&query.chapter_id).ok();
        let previous_chapter_id = content
            .previous
            .as_ref()
            .map(|link| link.id.clone())
            .or_else(|| {
                chapter_id
                    .as_ref()
                    .and_then(ChapterId::previous)
                    .map(|id| id.to_string())
            });
        let next_chapter_id = content.next.as_ref().map(|link| link.id.clone()).or_else(|| {
            chapter_id
                .as_ref()
                .zip(query.chapter_count)
                .and_then(|(id, count)| id.next(count))
                .map(|id| id.to_string())
        });

        tracing::debug!(
            bible_id = %query.bible_id,
            chapter_id = %query.chapter_id,
            verse_count = content.verse_count,
            "Chapter loaded"
        );

        Ok(ChapterResponse {
            content,
            previous_chapter_id,
            next_chapter_id,
        })
    }
}

/// ListVerses Handler
pub struct ListVersesHandler {
    provider: Arc<dyn ScriptureProviderPort>,
}

impl ListVersesHandler {
    pub fn new(provider: Arc<dyn ScriptureProviderPort>) -> Self {
        Self { provider }
    }

    pub async fn handle(&self, query: ListVerses) -> Result<Vec<VerseSummary>, ApplicationError> {
        Ok(self
            .provider
            .verses(&query.bible_id, &query.chapter_id)
            .await?)
    }
}

/// GetChapterAudio Handler - 无音频不是错误
pub struct GetChapterAudioHandler {
    provider: Arc<dyn ScriptureProviderPort>,
}

impl GetChapterAudioHandler {
    pub fn new(provider: Arc<dyn ScriptureProviderPort>) -> Self {
        Self { provider }
    }

    pub async fn handle(&self, query: GetChapterAudio) -> Option<ChapterAudio> {
        self.provider
            .chapter_audio(&query.bible_id, &query.chapter_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::FetchError;
    use crate::domain::scripture::ChapterLink;
    use async_trait::async_trait;

    struct StubProvider {
        content: Result<ChapterContent, FetchError>,
    }

    #[async_trait]
    impl ScriptureProviderPort for StubProvider {
        async fn bibles(&self) -> Result<Vec<Bible>, FetchError> {
            Ok(Vec::new())
        }
        async fn books(&self, _bible_id: &str) -> Result<Vec<Book>, FetchError> {
            Ok(Vec::new())
        }
        async fn chapters(&self, _: &str, _: &str) -> Result<Vec<Chapter>, FetchError> {
            Ok(Vec::new())
        }
        async fn chapter(&self, _: &str, _: &str) -> Result<ChapterContent, FetchError> {
            self.content.clone()
        }
        async fn verses(&self, _: &str, _: &str) -> Result<Vec<VerseSummary>, FetchError> {
            Ok(Vec::new())
        }
        async fn chapter_audio(&self, _: &str, _: &str) -> Option<ChapterAudio> {
            None
        }
    }

    fn content(id: &str) -> ChapterContent {
        ChapterContent {
            id: id.to_string(),
            org_id: None,
            book_id: "JHN".to_string(),
            number: None,
            reference: "John".to_string(),
            content: "<p></p>".to_string(),
            verse_count: 18,
            copyright: None,
            previous: None,
            next: None,
        }
    }

    #[tokio::test]
    async fn test_navigation_inferred_from_chapter_id() {
        let handler = GetChapterHandler::new(Arc::new(StubProvider {
            content: Ok(content("JHN.3")),
        }));
        let response = handler
            .handle(GetChapter {
                bible_id: "b".to_string(),
                chapter_id: "JHN.3".to_string(),
                chapter_count: Some(3),
            })
            .await
            .unwrap();
        assert_eq!(response.previous_chapter_id.as_deref(), Some("JHN.2"));
        assert_eq!(response.next_chapter_id, None);
    }

    #[tokio::test]
    async fn test_upstream_links_win() {
        let mut with_links = content("JHN.21");
        with_links.next = Some(ChapterLink {
            id: "ACT.1".to_string(),
            number: "1".to_string(),
            book_id: "ACT".to_string(),
        });
        let handler = GetChapterHandler::new(Arc::new(StubProvider {
            content: Ok(with_links),
        }));
        let response = handler
            .handle(GetChapter {
                bible_id: "b".to_string(),
                chapter_id: "JHN.21".to_string(),
                chapter_count: Some(21),
            })
            .await
            .unwrap();
        assert_eq!(response.next_chapter_id.as_deref(), Some("ACT.1"));
        assert_eq!(response.previous_chapter_id.as_deref(), Some("JHN.20"));
    }

    #[tokio::test]
    async fn test_provider_failure_surfaces() {
        let handler = GetChapterHandler::new(Arc::new(StubProvider {
            content: Err(FetchError::Provider { status: 500 }),
        }));
        let result = handler
            .handle(GetChapter {
                bible_id: "b".to_string(),
                chapter_id: "JHN.1".to_string(),
                chapter_count: None,
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::ExternalServiceError(_))));
    }

    #[tokio::test]
    async fn test_blank_chapter_id_rejected() {
        let handler = GetChapterHandler::new(Arc::new(StubProvider {
            content: Ok(content("JHN.1")),
        }));
        let result = handler
            .handle(GetChapter {
                bible_id: "b".to_string(),
                chapter_id: "  ".to_string(),
                chapter_count: None,
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_intro_chapter_uses_upstream_links_only() {
        let mut intro = content("GEN.intro");
        intro.book_id = "GEN".to_string();
        intro.next = Some(ChapterLink {
            id: "GEN.1".to_string(),
            number: "1".to_string(),
            book_id: "GEN".to_string(),
        });
        let handler = GetChapterHandler::new(Arc::new(StubProvider {
            content: Ok(intro),
        }));
        let response = handler
            .handle(GetChapter {
                bible_id: "b".to_string(),
                chapter_id: "GEN.intro".to_string(),
                chapter_count: Some(50),
            })
            .await
            .unwrap();
        assert_eq!(response.content.id, "GEN.intro");
        assert_eq!(response.previous_chapter_id, None);
        assert_eq!(response.next_chapter_id.as_deref(), Some("GEN.1"));
    }

    #[tokio::test]
    async fn test_intro_chapter_without_links_has_no_navigation() {
        let handler = GetChapterHandler::new(Arc::new(StubProvider {
            content: Ok(content("JHN.intro")),
        }));
        let response = handler
            .handle(GetChapter {
                bible_id: "b".to_string(),
                chapter_id: "JHN.intro".to_string(),
                chapter_count: Some(21),
            })
            .await
            .unwrap();
        assert_eq!(response.previous_chapter_id, None);
        assert_eq!(response.next_chapter_id, None);
    }
}
