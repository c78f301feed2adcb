use std::time::{Duration, Instant};

use chrono::Utc;
use metrics::{counter, gauge, histogram};
use rust_decimal::prelude::ToPrimitive;
use tokio::sync::broadcast;
use tokio::time::sleep;

use crate::api::ws_types::{UnreachableNotice, WsMessage};
use crate::bot::{StatusClient, StatusClientError};
use crate::services::snapshot::{build_snapshot, SnapshotStore, UNREACHABLE_MESSAGE};

/// Refresh cadence: `burst_count` quick polls, then a steady interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    pub burst_interval: Duration,
    pub burst_count: u32,
    pub steady_interval: Duration,
}

impl PollSchedule {
    /// Delay after the `tick`-th poll (0-based) since the last burst reset.
    pub fn delay_for(&self, tick: u32) -> Duration {
        if tick < self.burst_count {
            self.burst_interval
        } else {
            self.steady_interval
        }
    }
}

/// Poll the bot forever and publish each result to the store and to
/// connected dashboard sockets.
///
/// A failed poll keeps the previous data and flags the bot unreachable; the
/// next tick simply tries again. A change of the bot's active market
/// restarts the burst so the page catches up quickly.
pub async fn run_status_poller(
    client: StatusClient,
    store: SnapshotStore,
    ws_tx: broadcast::Sender<WsMessage>,
    schedule: PollSchedule,
) {
    tracing::info!(
        url = %client.url(),
        burst_secs = schedule.burst_interval.as_secs(),
        burst_count = schedule.burst_count,
        steady_secs = schedule.steady_interval.as_secs(),
        "Status poller started"
    );

    let mut tick: u32 = 0;
    let mut current_market: Option<String> = None;

    loop {
        match poll_once(&client, &store, &ws_tx).await {
            Ok(market_id) => {
                if current_market.is_some() && market_id != current_market {
                    tracing::info!(
                        from = ?current_market,
                        to = ?market_id,
                        "Bot switched market, restarting fast refresh"
                    );
                    tick = 0;
                }
                current_market = market_id;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Status poll failed, will retry");
            }
        }

        sleep(schedule.delay_for(tick)).await;
        tick = tick.saturating_add(1);
    }
}

/// One fetch-and-publish cycle. Returns the bot's active market id.
pub async fn poll_once(
    client: &StatusClient,
    store: &SnapshotStore,
    ws_tx: &broadcast::Sender<WsMessage>,
) -> Result<Option<String>, StatusClientError> {
    counter!("status_polls_total").increment(1);
    let started = Instant::now();

    let payload = match client.fetch().await {
        Ok(p) => p,
        Err(e) => {
            counter!("status_poll_failures_total").increment(1);
            let snapshot = store.mark_unreachable(&e.to_string()).await;
            // No receivers is fine: nobody has the page open.
            let _ = ws_tx.send(WsMessage::Unreachable(UnreachableNotice {
                error: snapshot.error.unwrap_or_else(|| UNREACHABLE_MESSAGE.into()),
                last_success: snapshot.fetched_at,
            }));
            return Err(e);
        }
    };

    histogram!("status_poll_latency_seconds").record(started.elapsed().as_secs_f64());

    let snapshot = build_snapshot(payload, Utc::now());

    if let Some(equity) = snapshot.equity.and_then(|e| e.to_f64()) {
        gauge!("bot_equity").set(equity);
    }
    if let Some(ath) = snapshot.curve.all_time_high.to_f64() {
        gauge!("bot_all_time_high").set(ath);
    }
    gauge!("reconciled_trades").set(snapshot.trades.len() as f64);

    tracing::debug!(
        trades = snapshot.trades.len(),
        points = snapshot.curve.points.len(),
        all_time_high = %snapshot.curve.all_time_high,
        "Dashboard snapshot rebuilt"
    );

    let market_id = snapshot.market_id.clone();
    store.replace(snapshot.clone()).await;
    let _ = ws_tx.send(WsMessage::Snapshot(Box::new(snapshot)));

    Ok(market_id)
}
