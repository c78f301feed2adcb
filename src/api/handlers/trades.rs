use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::models::ReconciledTradeRecord;
use crate::AppState;

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// GET /api/trades: reconciled trades, newest first.
pub async fn list(State(state): State<AppState>) -> Json<ApiResponse<Vec<ReconciledTradeRecord>>> {
    let snapshot = state.snapshots.get().await;

    Json(ApiResponse {
        success: snapshot.reachable,
        error: snapshot.error,
        data: Some(snapshot.trades),
    })
}
