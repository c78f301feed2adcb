use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;

use crate::AppState;

/// Prometheus scrape target for the poller's series: `status_polls_total`,
/// `status_poll_failures_total`, `status_poll_latency_seconds`, and the
/// `bot_equity`, `bot_all_time_high` and `reconciled_trades` gauges from the
/// last good snapshot.
pub async fn scrape(State(state): State<AppState>) -> impl IntoResponse {
    let exposition = state.metrics_handle.render();
    ([(CONTENT_TYPE, "text/plain; version=0.0.4")], exposition)
}
