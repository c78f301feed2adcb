use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::analytics::baseline::start_equity;
use crate::analytics::equity_curve::build_curve;
use crate::analytics::reconcile::reconcile;
use crate::analytics::summary::{recent_first, summarize, TradeSummary};
use crate::format::{format_duration, format_latency};
use crate::models::{DecisionEntry, EquityCurve, ReconciledTradeRecord, StatusPayload};

/// Message shown while the bot's status endpoint cannot be read.
pub const UNREACHABLE_MESSAGE: &str = "cannot reach bot";

/// Everything the page renders, rebuilt from each successful poll.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub reachable: bool,
    pub error: Option<String>,
    /// When the dashboard last read the bot successfully.
    pub fetched_at: Option<DateTime<Utc>>,
    /// The bot's own generation time for the payload.
    pub updated_at: Option<String>,
    pub market_id: Option<String>,
    pub equity: Option<Decimal>,
    pub start_equity: Decimal,
    pub curve: EquityCurve,
    pub summary: TradeSummary,
    /// Reconciled trades, newest first.
    pub trades: Vec<ReconciledTradeRecord>,
    pub prices: BTreeMap<String, Decimal>,
    pub decisions: Vec<DecisionEntry>,
    pub uptime: String,
    pub latency: String,
}

impl Default for DashboardSnapshot {
    fn default() -> Self {
        Self {
            reachable: false,
            error: None,
            fetched_at: None,
            updated_at: None,
            market_id: None,
            equity: None,
            start_equity: Decimal::ZERO,
            curve: EquityCurve::default(),
            summary: TradeSummary::default(),
            trades: Vec::new(),
            prices: BTreeMap::new(),
            decisions: Vec::new(),
            uptime: format_duration(f64::NAN),
            latency: format_latency(f64::NAN),
        }
    }
}

/// Payload → reconciled trades → baseline → equity curve → snapshot.
pub fn build_snapshot(payload: StatusPayload, now: DateTime<Utc>) -> DashboardSnapshot {
    let secondary = payload.analytics_trades.as_deref().unwrap_or_default();
    let reconciled = reconcile(&payload.trades, secondary);

    let records: Vec<_> = reconciled.iter().map(|t| t.record.clone()).collect();
    let start = start_equity(&payload, &records);
    let curve = build_curve(&records, start, now);

    DashboardSnapshot {
        reachable: true,
        error: None,
        fetched_at: Some(now),
        updated_at: payload.updated_at,
        market_id: payload.market_id,
        equity: payload.equity,
        start_equity: start,
        summary: summarize(&reconciled),
        trades: recent_first(&reconciled),
        curve,
        prices: payload.prices,
        decisions: payload.decisions,
        uptime: format_duration(payload.uptime_secs.unwrap_or(f64::NAN)),
        latency: format_latency(payload.latency_ms.unwrap_or(f64::NAN)),
    }
}

/// Shared, most-recent snapshot. Readers get a clone.
#[derive(Clone, Default)]
pub struct SnapshotStore {
    inner: Arc<RwLock<DashboardSnapshot>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self) -> DashboardSnapshot {
        self.inner.read().await.clone()
    }

    pub async fn replace(&self, snapshot: DashboardSnapshot) {
        *self.inner.write().await = snapshot;
    }

    /// Keep the last good data on screen but flag the bot as unreachable.
    pub async fn mark_unreachable(&self, detail: &str) -> DashboardSnapshot {
        let mut snapshot = self.inner.write().await;
        snapshot.reachable = false;
        snapshot.error = Some(format!("{UNREACHABLE_MESSAGE}: {detail}"));
        snapshot.clone()
    }
}
