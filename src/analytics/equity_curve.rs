use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::models::{EquityCurve, EquityPoint, TradeRecord};

/// Rebuild the equity curve from the bot's trade list.
///
/// Only WIN/LOSS trades move the curve. Trades are folded in timestamp
/// order (unparsable timestamps first) starting from `start_equity`; the
/// result has at most one point per second, sorted ascending, always ends
/// at `now` and has at least two points. Malformed trades are skipped,
/// never fatal.
pub fn build_curve(
    trades: &[TradeRecord],
    start_equity: Decimal,
    now: DateTime<Utc>,
) -> EquityCurve {
    let mut realized: Vec<(Option<DateTime<Utc>>, &TradeRecord)> = trades
        .iter()
        .filter(|t| t.result.is_realized())
        .map(|t| (t.timestamp.parse(), t))
        .collect();
    realized.sort_by_key(|(ts, _)| *ts);

    let now_secs = now.timestamp();
    let mut series = SecondSeries::default();
    let mut running = start_equity;
    let mut all_time_high = start_equity;

    // Seed one second before the first trade, when that instant exists.
    if let Some((Some(first), _)) = realized.first() {
        if let Some(seed) = first.checked_sub_signed(Duration::seconds(1)) {
            series.emit(seed.timestamp(), start_equity);
        }
    }

    let mut skipped = 0usize;
    for (ts, trade) in &realized {
        let Some(next) = trade.pnl.and_then(|pnl| running.checked_add(pnl)) else {
            skipped += 1;
            continue;
        };
        running = next;
        all_time_high = all_time_high.max(running);

        if let Some(ts) = ts {
            series.emit(ts.timestamp(), running);
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, "Trades with unusable pnl left out of equity curve");
    }

    if series.last_emitted != Some(now_secs) {
        series.emit(now_secs, running);
    }

    // A single point cannot be drawn as a line.
    if series.values.len() < 2 {
        series.values.entry(now_secs - 1).or_insert(start_equity);
    }

    let points = series.into_points();
    let all_time_high = points
        .iter()
        .map(|p| p.value)
        .fold(all_time_high, Decimal::max);

    EquityCurve {
        points,
        all_time_high,
    }
}

/// Points keyed by unix second; a later write to the same second replaces
/// the earlier one.
#[derive(Default)]
struct SecondSeries {
    values: BTreeMap<i64, Decimal>,
    last_emitted: Option<i64>,
}

impl SecondSeries {
    fn emit(&mut self, secs: i64, value: Decimal) {
        self.values.insert(secs, value);
        self.last_emitted = Some(secs);
    }

    fn into_points(self) -> Vec<EquityPoint> {
        self.values
            .into_iter()
            .filter_map(|(secs, value)| {
                DateTime::from_timestamp(secs, 0).map(|time| EquityPoint { time, value })
            })
            .collect()
    }
}
