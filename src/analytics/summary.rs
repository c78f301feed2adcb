use std::cmp::Reverse;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{ReconciledTradeRecord, TradeOutcome};

/// Headline statistics for the trade table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TradeSummary {
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub pending: usize,
    pub win_rate: Decimal,
    pub realized_pnl: Decimal,
    pub best_trade: Decimal,
    pub worst_trade: Decimal,
}

pub fn summarize(trades: &[ReconciledTradeRecord]) -> TradeSummary {
    let count = |outcome: TradeOutcome| trades.iter().filter(|t| t.record.result == outcome).count();

    let wins = count(TradeOutcome::Win);
    let losses = count(TradeOutcome::Loss);
    let pending = count(TradeOutcome::Pending);

    let realized: Vec<Decimal> = trades
        .iter()
        .filter_map(|t| t.record.realized_pnl())
        .collect();

    let realized_pnl = realized
        .iter()
        .fold(Decimal::ZERO, |acc, pnl| acc.checked_add(*pnl).unwrap_or(acc));

    let decided = wins + losses;
    let win_rate = if decided > 0 {
        Decimal::from(wins as u64) / Decimal::from(decided as u64)
    } else {
        Decimal::ZERO
    };

    TradeSummary {
        total_trades: trades.len(),
        wins,
        losses,
        pending,
        win_rate,
        realized_pnl,
        best_trade: realized.iter().copied().max().unwrap_or(Decimal::ZERO),
        worst_trade: realized.iter().copied().min().unwrap_or(Decimal::ZERO),
    }
}

/// Copy of `trades` newest first, for display. Undated trades go last.
pub fn recent_first(trades: &[ReconciledTradeRecord]) -> Vec<ReconciledTradeRecord> {
    let mut sorted = trades.to_vec();
    sorted.sort_by_key(|t| Reverse(t.record.timestamp.parse()));
    sorted
}
