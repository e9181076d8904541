//! Scripture Handlers - 译本、书卷、章节、经节与章节音频

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{
    ChapterResponse, GetChapter, GetChapterAudio, ListBibles, ListBooks, ListChapters, ListVerses,
};
use crate::domain::scripture::{Bible, Book, Chapter, ChapterAudio, VerseSummary};
use crate::infrastructure::http::dto::{
    ApiResponse, ChapterRequest, GetChapterRequest, ListBooksRequest, ListChaptersRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn list_bibles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Bible>>>, ApiError> {
    let bibles = state.list_bibles_handler.handle(ListBibles).await?;
    Ok(Json(ApiResponse::success(bibles)))
}

pub async fn list_books(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ListBooksRequest>,
) -> Result<Json<ApiResponse<Vec<Book>>>, ApiError> {
    let query = ListBooks {
        bible_id: state.bible_id(req.bible_id),
    };
    let books = state.list_books_handler.handle(query).await?;
    Ok(Json(ApiResponse::success(books)))
}

pub async fn list_chapters(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ListChaptersRequest>,
) -> Result<Json<ApiResponse<Vec<Chapter>>>, ApiError> {
    let query = ListChapters {
        bible_id: state.bible_id(req.bible_id),
        book_id: req.book_id,
    };
    let chapters = state.list_chapters_handler.handle(query).await?;
    Ok(Json(ApiResponse::success(chapters)))
}

pub async fn get_chapter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GetChapterRequest>,
) -> Result<Json<ApiResponse<ChapterResponse>>, ApiError> {
    let query = GetChapter {
        bible_id: state.bible_id(req.bible_id),
        chapter_id: req.chapter_id,
        chapter_count: req.chapter_count,
    };
    let chapter = state.get_chapter_handler.handle(query).await?;
    Ok(Json(ApiResponse::success(chapter)))
}

pub async fn list_verses(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChapterRequest>,
) -> Result<Json<ApiResponse<Vec<VerseSummary>>>, ApiError> {
    let query = ListVerses {
        bible_id: state.bible_id(req.bible_id),
        chapter_id: req.chapter_id,
    };
    let verses = state.list_verses_handler.handle(query).await?;
    Ok(Json(ApiResponse::success(verses)))
}

/// 章节音频；无可用音频时 data 为 null
pub async fn get_chapter_audio(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChapterRequest>,
) -> Json<ApiResponse<Option<ChapterAudio>>> {
    let query = GetChapterAudio {
        bible_id: state.bible_id(req.bible_id),
        chapter_id: req.chapter_id,
    };
    let audio = state.get_chapter_audio_handler.handle(query).await;
    Json(ApiResponse::success(audio))
}
