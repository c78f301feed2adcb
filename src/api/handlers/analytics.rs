use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::analytics::summary::TradeSummary;
use crate::format::format_usd;
use crate::models::EquityCurve;
use crate::AppState;

#[derive(Serialize)]
pub struct EquityCurveResponse {
    #[serde(flatten)]
    pub curve: EquityCurve,
    pub drawdown: String,
    pub all_time_high_display: String,
}

#[derive(Serialize)]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub summary: TradeSummary,
    pub equity: Option<String>,
    pub realized_pnl_display: String,
}

/// GET /api/equity-curve: chart points plus the high-water mark.
pub async fn equity_curve(State(state): State<AppState>) -> Json<EquityCurveResponse> {
    let curve = state.snapshots.get().await.curve;

    Json(EquityCurveResponse {
        drawdown: curve.drawdown().to_string(),
        all_time_high_display: format_usd(curve.all_time_high),
        curve,
    })
}

/// GET /api/summary: win/loss statistics over reconciled trades.
pub async fn summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let snapshot = state.snapshots.get().await;

    Json(SummaryResponse {
        realized_pnl_display: format_usd(snapshot.summary.realized_pnl),
        equity: snapshot.equity.map(format_usd),
        summary: snapshot.summary,
    })
}
