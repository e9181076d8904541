//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping               GET   健康检查 + 缓存统计
//! - /api/bibles             GET   译本列表
//! - /api/books              POST  书卷列表
//! - /api/chapters           POST  章节列表
//! - /api/chapter            POST  章节正文 + 前后章
//! - /api/verses             POST  经节列表
//! - /api/audio              POST  章节音频（无则 null）
//! - /api/notes/list         GET   全部笔记
//! - /api/notes/list         POST  按经文引用过滤
//! - /api/notes/add          POST  添加笔记
//! - /api/notes/delete       POST  删除笔记
//! - /api/playback/open      POST  打开章节播放（或切换章节）
//! - /api/playback/toggle    POST  播放/暂停
//! - /api/playback/seek      POST  进度条跳转
//! - /api/playback/skip      POST  快进/快退
//! - /api/playback/speed     POST  切换倍速
//! - /api/playback/media     POST  媒体元素通知
//! - /api/playback/get       POST  当前播放快照
//! - /api/playback/close     POST  关闭会话
//! - /ws/playback/{id}       WS    播放事件推送

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .route(
            "/ws/playback/:session_id",
            get(handlers::playback_websocket_handler),
        )
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/bibles", get(handlers::list_bibles))
        .route("/books", post(handlers::list_books))
        .route("/chapters", post(handlers::list_chapters))
        .route("/chapter", post(handlers::get_chapter))
        .route("/verses", post(handlers::list_verses))
        .route("/audio", post(handlers::get_chapter_audio))
        .nest("/notes", note_routes())
        .nest("/playback", playback_routes())
}

/// Note 路由
fn note_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/list",
            get(handlers::list_all_notes).post(handlers::list_notes),
        )
        .route("/add", post(handlers::add_note))
        .route("/delete", post(handlers::delete_note))
}

/// Playback 路由
fn playback_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/open", post(handlers::open_playback))
        .route("/toggle", post(handlers::toggle_play))
        .route("/seek", post(handlers::seek))
        .route("/skip", post(handlers::skip))
        .route("/speed", post(handlers::cycle_speed))
        .route("/media", post(handlers::media_event))
        .route("/get", post(handlers::get_playback))
        .route("/close", post(handlers::close_playback))
}
