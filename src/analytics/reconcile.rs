use std::collections::HashMap;

use crate::models::{ReconciledTradeRecord, TradeRecord, TradeSource};

/// Joins key components. Unit separator never appears in a market id or a
/// side label.
const KEY_SEPARATOR: char = '\u{1f}';

/// Canonical side label: UP→YES, DOWN→NO, anything else upper-cased,
/// empty or missing → "".
pub fn normalize_side(side: Option<&str>) -> String {
    let upper = side.unwrap_or_default().to_uppercase();
    match upper.as_str() {
        "UP" => "YES".into(),
        "DOWN" => "NO".into(),
        _ => upper,
    }
}

/// Reconciliation key for a market and an already-normalized side.
pub fn trade_key(market_id: &str, normalized_side: &str) -> String {
    format!("{market_id}{KEY_SEPARATOR}{normalized_side}")
}

/// Merge the bot's execution log (`primary`) with the analytics feed
/// (`secondary`) into one record per (market, side).
///
/// Within `primary` the last record for a key wins; any `secondary` record
/// then replaces it. Output keeps the slot of each key's first insertion.
pub fn reconcile(
    primary: &[TradeRecord],
    secondary: &[TradeRecord],
) -> Vec<ReconciledTradeRecord> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<ReconciledTradeRecord> = Vec::new();

    let tagged = primary
        .iter()
        .map(|t| (t, TradeSource::Primary))
        .chain(secondary.iter().map(|t| (t, TradeSource::Secondary)));

    for (trade, source) in tagged {
        let side = normalize_side(Some(&trade.side));
        let key = trade_key(&trade.market_id, &side);

        let mut record = trade.clone();
        record.side = side;
        let entry = ReconciledTradeRecord { record, source };

        match slots.get(&key) {
            Some(&idx) => merged[idx] = entry,
            None => {
                slots.insert(key, merged.len());
                merged.push(entry);
            }
        }
    }

    tracing::debug!(
        primary = primary.len(),
        secondary = secondary.len(),
        reconciled = merged.len(),
        "Trades reconciled"
    );

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn trade(market_id: &str, side: &str, pnl: i64) -> TradeRecord {
        serde_json::from_value(serde_json::json!({
            "marketId": market_id,
            "side": side,
            "result": "WIN",
            "pnl": pnl,
        }))
        .unwrap()
    }

    #[test]
    fn test_normalize_side() {
        assert_eq!(normalize_side(Some("up")), "YES");
        assert_eq!(normalize_side(Some("DOWN")), "NO");
        assert_eq!(normalize_side(Some("yes")), "YES");
        assert_eq!(normalize_side(Some("No")), "NO");
        assert_eq!(normalize_side(Some("draw")), "DRAW");
        assert_eq!(normalize_side(Some("")), "");
        assert_eq!(normalize_side(None), "");
    }

    #[test]
    fn test_normalize_side_keeps_whitespace() {
        assert_eq!(normalize_side(Some("  ")), "  ");
        assert_eq!(normalize_side(Some(" up")), " UP");
        assert_ne!(
            trade_key("m1", &normalize_side(Some("  "))),
            trade_key("m1", &normalize_side(None))
        );
    }

    #[test]
    fn test_key_does_not_collide_on_concatenation() {
        assert_ne!(trade_key("m1Y", "ES"), trade_key("m1", "YES"));
    }

    #[test]
    fn test_secondary_wins_after_normalization() {
        let merged = reconcile(&[trade("m1", "UP", 5)], &[trade("m1", "YES", 9)]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].record.pnl, Some(Decimal::from(9)));
        assert_eq!(merged[0].record.side, "YES");
        assert_eq!(merged[0].source, TradeSource::Secondary);
    }

    #[test]
    fn test_last_primary_wins_for_repeated_key() {
        let merged = reconcile(&[trade("m1", "NO", 1), trade("m1", "down", 2)], &[]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].record.pnl, Some(Decimal::from(2)));
        assert_eq!(merged[0].source, TradeSource::Primary);
    }

    #[test]
    fn test_order_follows_first_insertion() {
        let merged = reconcile(
            &[trade("a", "YES", 1), trade("b", "YES", 2)],
            &[trade("c", "NO", 3), trade("a", "UP", 4)],
        );

        let markets: Vec<&str> = merged.iter().map(|t| t.record.market_id.as_str()).collect();
        assert_eq!(markets, vec!["a", "b", "c"]);
        assert_eq!(merged[0].record.pnl, Some(Decimal::from(4)));
    }

    #[test]
    fn test_missing_fields_degrade_to_empty_key() {
        let blank: TradeRecord = serde_json::from_value(serde_json::json!({})).unwrap();
        let merged = reconcile(&[blank.clone(), blank], &[]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].record.market_id, "");
        assert_eq!(merged[0].record.side, "");
    }
}
