use rust_decimal::Decimal;

use crate::models::{StatusPayload, TradeRecord};

/// Starting balance for the equity curve.
///
/// Uses the bot's explicit `initialEquity` when present. Otherwise backs the
/// realized pnl out of the current equity; with neither, starts at zero.
pub fn start_equity<'a, I>(payload: &StatusPayload, trades: I) -> Decimal
where
    I: IntoIterator<Item = &'a TradeRecord>,
{
    if let Some(initial) = payload.initial_equity {
        return initial;
    }

    let Some(equity) = payload.equity else {
        return Decimal::ZERO;
    };

    let realized = trades
        .into_iter()
        .filter_map(TradeRecord::realized_pnl)
        .fold(Decimal::ZERO, |acc, pnl| acc.checked_add(pnl).unwrap_or(acc));

    equity.checked_sub(realized).unwrap_or(equity)
}
