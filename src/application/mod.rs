//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（ScriptureProvider、FetchCache、NoteStore、PlaybackSession 等）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Note commands
    AddNote,
    DeleteNote,
    // Playback commands
    ClosePlayback,
    ControlPlayback,
    OpenPlayback,
    OpenPlaybackResponse,
    // Handlers
    handlers::{
        AddNoteHandler, ClosePlaybackHandler, ControlPlaybackHandler, DeleteNoteHandler,
        OpenPlaybackHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Clock
    Clock,
    SystemClock,
    // Fetch cache
    generate_audio_cache_key,
    CacheStats,
    FetchCachePort,
    // Notes
    NoteLedgerPort,
    NoteStorePort,
    StoreError,
    // Playback
    PlaybackChapter,
    PlaybackSessionError,
    PlaybackSessionPort,
    // Scripture provider
    FetchError,
    ScriptureProviderPort,
    ScriptureTransportPort,
};

pub use queries::{
    // Scripture queries
    GetChapter,
    GetChapterAudio,
    ListBibles,
    ListBooks,
    ListChapters,
    ListVerses,
    // Note queries
    ListNotes,
    // Playback queries
    GetPlayback,
    // Handlers
    handlers::{
        ChapterResponse, GetChapterAudioHandler, GetChapterHandler, GetPlaybackHandler,
        ListBiblesHandler, ListBooksHandler, ListChaptersHandler, ListNotesHandler,
        ListVersesHandler,
    },
};
