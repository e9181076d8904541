//! Ping Handler
//!
//! 健康检查，附带 Fetch Cache 统计

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::application::CacheStats;
use crate::infrastructure::http::state::AppState;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub cache: CacheStats,
}

/// Ping endpoint - 健康检查
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        cache: state.fetch_cache.stats(),
    })
}
