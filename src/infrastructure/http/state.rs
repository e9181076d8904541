//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    AddNoteHandler, ClosePlaybackHandler, ControlPlaybackHandler, DeleteNoteHandler,
    OpenPlaybackHandler,
    // Query handlers
    GetChapterAudioHandler, GetChapterHandler, GetPlaybackHandler, ListBiblesHandler,
    ListBooksHandler, ListChaptersHandler, ListNotesHandler, ListVersesHandler,
    // Ports
    Clock, FetchCachePort, NoteLedgerPort, PlaybackSessionPort, ScriptureProviderPort,
};
use crate::infrastructure::events::EventPublisher;

/// 应用状态
pub struct AppState {
    /// 请求未指定译本时使用
    pub default_bible_id: String,

    // ========== Ports ==========
    pub fetch_cache: Arc<dyn FetchCachePort>,
    pub playback_sessions: Arc<dyn PlaybackSessionPort>,
    pub event_publisher: Arc<EventPublisher>,

    // ========== Command Handlers ==========
    pub add_note_handler: AddNoteHandler,
    pub delete_note_handler: DeleteNoteHandler,
    pub open_playback_handler: OpenPlaybackHandler,
    pub control_playback_handler: ControlPlaybackHandler,
    pub close_playback_handler: ClosePlaybackHandler,

    // ========== Query Handlers ==========
    pub list_bibles_handler: ListBiblesHandler,
    pub list_books_handler: ListBooksHandler,
    pub list_chapters_handler: ListChaptersHandler,
    pub get_chapter_handler: GetChapterHandler,
    pub list_verses_handler: ListVersesHandler,
    pub get_chapter_audio_handler: GetChapterAudioHandler,
    pub list_notes_handler: ListNotesHandler,
    pub get_playback_handler: GetPlaybackHandler,
}

impl AppState {
    /// 创建应用状态
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        default_bible_id: impl Into<String>,
        provider: Arc<dyn ScriptureProviderPort>,
        fetch_cache: Arc<dyn FetchCachePort>,
        note_ledger: Arc<dyn NoteLedgerPort>,
        playback_sessions: Arc<dyn PlaybackSessionPort>,
        event_publisher: Arc<EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            default_bible_id: default_bible_id.into(),

            // Ports
            fetch_cache,
            playback_sessions: playback_sessions.clone(),
            event_publisher,

            // Command handlers
            add_note_handler: AddNoteHandler::new(note_ledger.clone(), clock),
            delete_note_handler: DeleteNoteHandler::new(note_ledger.clone()),
            open_playback_handler: OpenPlaybackHandler::new(
                provider.clone(),
                playback_sessions.clone(),
            ),
            control_playback_handler: ControlPlaybackHandler::new(playback_sessions.clone()),
            close_playback_handler: ClosePlaybackHandler::new(playback_sessions.clone()),

            // Query handlers
            list_bibles_handler: ListBiblesHandler::new(provider.clone()),
            list_books_handler: ListBooksHandler::new(provider.clone()),
            list_chapters_handler: ListChaptersHandler::new(provider.clone()),
            get_chapter_handler: GetChapterHandler::new(provider.clone()),
            list_verses_handler: ListVersesHandler::new(provider.clone()),
            get_chapter_audio_handler: GetChapterAudioHandler::new(provider),
            list_notes_handler: ListNotesHandler::new(note_ledger),
            get_playback_handler: GetPlaybackHandler::new(playback_sessions),
        }
    }

    /// 请求中的译本，空白时回落到默认译本
    pub fn bible_id(&self, requested: Option<String>) -> String {
        requested
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| self.default_bible_id.clone())
    }
}
