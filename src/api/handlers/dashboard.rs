use axum::extract::{OriginalUri, State};
use axum::Json;

use crate::errors::AppError;
use crate::services::poller::poll_once;
use crate::services::snapshot::DashboardSnapshot;
use crate::AppState;

/// GET /api/dashboard: the full snapshot the page renders from.
pub async fn snapshot(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    Json(state.snapshots.get().await)
}

/// POST /api/refresh: poll the bot now instead of waiting for the next tick.
pub async fn refresh(State(state): State<AppState>) -> Result<Json<DashboardSnapshot>, AppError> {
    poll_once(&state.client, &state.snapshots, &state.ws_tx).await?;
    Ok(Json(state.snapshots.get().await))
}

pub async fn not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
