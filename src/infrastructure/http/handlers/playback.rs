//! Playback Handlers
//!
//! 用户控制与浏览器媒体元素通知都转换为 PlaybackInput，
//! 同步器产生的事件通过 `/ws/playback/{session_id}` 推送

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{ClosePlayback, ControlPlayback, GetPlayback, OpenPlayback};
use crate::domain::playback::PlaybackInput;
use crate::infrastructure::http::dto::{
    ApiResponse, Empty, MediaEventKind, MediaEventRequest, OpenPlaybackRequest,
    OpenPlaybackResponseDto, PlaybackResponseDto, SeekRequest, SessionRequest, SkipDirection,
    SkipRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

type PlaybackResult = Result<Json<ApiResponse<PlaybackResponseDto>>, ApiError>;

// ============================================================================
// Open / Close
// ============================================================================

pub async fn open_playback(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OpenPlaybackRequest>,
) -> Result<Json<ApiResponse<OpenPlaybackResponseDto>>, ApiError> {
    let cmd = OpenPlayback {
        session_id: req.session_id,
        bible_id: state.bible_id(req.bible_id),
        chapter_id: req.chapter_id,
        verse_count: req.verse_count,
    };

    let result = state.open_playback_handler.handle(cmd).await?;

    Ok(Json(ApiResponse::success(OpenPlaybackResponseDto {
        session_id: result.session_id,
        reference: result.reference,
        playback: result.snapshot,
    })))
}

pub async fn close_playback(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .close_playback_handler
        .handle(ClosePlayback {
            session_id: req.session_id,
        })
        .await?;
    Ok(Json(ApiResponse::ok()))
}

pub async fn get_playback(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SessionRequest>,
) -> PlaybackResult {
    let playback = state
        .get_playback_handler
        .handle(GetPlayback {
            session_id: req.session_id.clone(),
        })
        .await?;
    Ok(Json(ApiResponse::success(PlaybackResponseDto {
        session_id: req.session_id,
        playback,
    })))
}

// ============================================================================
// Controls
// ============================================================================

pub async fn toggle_play(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SessionRequest>,
) -> PlaybackResult {
    control(&state, req.session_id, PlaybackInput::TogglePlay).await
}

pub async fn seek(State(state): State<Arc<AppState>>, Json(req): Json<SeekRequest>) -> PlaybackResult {
    control(
        &state,
        req.session_id,
        PlaybackInput::Seek {
            fraction: req.fraction,
        },
    )
    .await
}

pub async fn skip(State(state): State<Arc<AppState>>, Json(req): Json<SkipRequest>) -> PlaybackResult {
    let input = match req.direction {
        SkipDirection::Back => PlaybackInput::SkipBack,
        SkipDirection::Forward => PlaybackInput::SkipForward,
    };
    control(&state, req.session_id, input).await
}

pub async fn cycle_speed(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SessionRequest>,
) -> PlaybackResult {
    control(&state, req.session_id, PlaybackInput::CycleSpeed).await
}

/// 浏览器媒体元素通知（timeupdate / ended / loadedmetadata）
pub async fn media_event(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MediaEventRequest>,
) -> PlaybackResult {
    let input = match req.kind {
        MediaEventKind::TimeUpdate => PlaybackInput::TimeUpdate {
            current_time: req.current_time.ok_or_else(|| {
                ApiError::BadRequest("current_time is required for time_update".to_string())
            })?,
        },
        MediaEventKind::Ended => PlaybackInput::Ended,
        MediaEventKind::MetadataLoaded => PlaybackInput::MetadataLoaded {
            duration: req.duration,
        },
    };
    control(&state, req.session_id, input).await
}

async fn control(state: &AppState, session_id: String, input: PlaybackInput) -> PlaybackResult {
    let playback = state
        .control_playback_handler
        .handle(ControlPlayback {
            session_id: session_id.clone(),
            input,
        })
        .await?;
    Ok(Json(ApiResponse::success(PlaybackResponseDto {
        session_id,
        playback,
    })))
}
