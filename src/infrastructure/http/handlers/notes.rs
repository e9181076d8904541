//! Note Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{AddNote, DeleteNote, ListNotes};
use crate::domain::notes::Note;
use crate::infrastructure::http::dto::{
    AddNoteRequest, ApiResponse, DeleteNoteRequest, ListNotesRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 全部笔记
pub async fn list_all_notes(State(state): State<Arc<AppState>>) -> Json<ApiResponse<Vec<Note>>> {
    let notes = state.list_notes_handler.handle(ListNotes::default()).await;
    Json(ApiResponse::success(notes))
}

/// 指定经文引用下的笔记
pub async fn list_notes(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ListNotesRequest>,
) -> Json<ApiResponse<Vec<Note>>> {
    let query = ListNotes {
        verse_reference: req.verse_reference,
    };
    let notes = state.list_notes_handler.handle(query).await;
    Json(ApiResponse::success(notes))
}

pub async fn add_note(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddNoteRequest>,
) -> Result<Json<ApiResponse<Note>>, ApiError> {
    let cmd = AddNote {
        verse_reference: req.verse_reference,
        content: req.content,
    };
    let note = state.add_note_handler.handle(cmd).await?;
    Ok(Json(ApiResponse::success(note)))
}

pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DeleteNoteRequest>,
) -> Result<Json<ApiResponse<Note>>, ApiError> {
    let note = state
        .delete_note_handler
        .handle(DeleteNote { id: req.id })
        .await?;
    Ok(Json(ApiResponse::success(note)))
}
