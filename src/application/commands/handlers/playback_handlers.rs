//! Playback Command Handlers
//!
//! 打开章节时并发获取正文（经节数、引用标签）与音频；
//! 两者都是尽力而为，失败时退回默认经节数和模拟播放

use std::sync::Arc;

use crate::application::commands::{
    ClosePlayback, ControlPlayback, OpenPlayback, OpenPlaybackResponse,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{PlaybackChapter, PlaybackSessionPort, ScriptureProviderPort};
use crate::domain::playback::PlaybackSnapshot;

/// OpenPlayback Handler - 创建会话或为已有会话切换章节
pub struct OpenPlaybackHandler {
    provider: Arc<dyn ScriptureProviderPort>,
    sessions: Arc<dyn PlaybackSessionPort>,
}

impl OpenPlaybackHandler {
    pub fn new(
        provider: Arc<dyn ScriptureProviderPort>,
        sessions: Arc<dyn PlaybackSessionPort>,
    ) -> Self {
        Self { provider, sessions }
    }

    pub async fn handle(&self, cmd: OpenPlayback) -> Result<OpenPlaybackResponse, ApplicationError> {
        if cmd.chapter_id.trim().is_empty() {
            return Err(ApplicationError::validation("chapter_id cannot be empty"));
        }
        if let Some(session_id) = &cmd.session_id {
            if !self.sessions.is_valid(session_id) {
                return Err(ApplicationError::not_found("Playback session", session_id.clone()));
            }
        }

        let (content, audio) = tokio::join!(
            self.provider.chapter(&cmd.bible_id, &cmd.chapter_id),
            self.provider.chapter_audio(&cmd.bible_id, &cmd.chapter_id),
        );

        let (reference, content_verses) = match content {
            Ok(content) => (content.reference, Some(content.verse_count)),
            Err(e) => {
                tracing::warn!(
                    chapter_id = %cmd.chapter_id,
                    error = %e,
                    "Chapter content unavailable, using default verse count"
                );
                (cmd.chapter_id.clone(), None)
            }
        };

        let chapter = PlaybackChapter {
            bible_id: cmd.bible_id.clone(),
            chapter_id: cmd.chapter_id.clone(),
            reference: reference.clone(),
            verse_count: cmd
                .verse_count
                .filter(|count| *count > 0)
                .or(content_verses.filter(|count| *count > 0)),
            audio,
        };

        let (session_id, snapshot) = match cmd.session_id {
            Some(session_id) => {
                let snapshot = self.sessions.change_chapter(&session_id, chapter).await?;
                (session_id, snapshot)
            }
            None => self.sessions.open(chapter).await,
        };

        tracing::info!(
            session_id = %session_id,
            chapter_id = %cmd.chapter_id,
            mode = snapshot.mode,
            total_verses = snapshot.total_verses,
            "Playback opened"
        );

        Ok(OpenPlaybackResponse {
            session_id,
            reference,
            snapshot,
        })
    }
}

/// ControlPlayback Handler
pub struct ControlPlaybackHandler {
    sessions: Arc<dyn PlaybackSessionPort>,
}

impl ControlPlaybackHandler {
    pub fn new(sessions: Arc<dyn PlaybackSessionPort>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, cmd: ControlPlayback) -> Result<PlaybackSnapshot, ApplicationError> {
        Ok(self.sessions.apply(&cmd.session_id, cmd.input).await?)
    }
}

/// ClosePlayback Handler
pub struct ClosePlaybackHandler {
    sessions: Arc<dyn PlaybackSessionPort>,
}

impl ClosePlaybackHandler {
    pub fn new(sessions: Arc<dyn PlaybackSessionPort>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, cmd: ClosePlayback) -> Result<(), ApplicationError> {
        self.sessions.close(&cmd.session_id).await?;
        Ok(())
    }
}
