use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::AppState;

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.snapshots.get().await;

    if snapshot.reachable {
        (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "bot_url": state.config.bot_status_url,
                "last_success": snapshot.fetched_at,
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "bot": "unreachable",
                "bot_url": state.config.bot_status_url,
                "error": snapshot.error,
                "last_success": snapshot.fetched_at,
            })),
        )
    }
}
