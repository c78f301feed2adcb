use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::trade::{decimal_from_value, lenient_decimal, lenient_string, RawTimestamp, TradeRecord};

/// The bot's status endpoint body. Only the fields the dashboard reads are
/// modelled; everything else is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPayload {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub trades: Vec<TradeRecord>,
    #[serde(default, deserialize_with = "lenient_opt_vec")]
    pub analytics_trades: Option<Vec<TradeRecord>>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub equity: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub initial_equity: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub uptime_secs: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latency_ms: Option<f64>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub market_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_prices")]
    pub prices: BTreeMap<String, Decimal>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub decisions: Vec<DecisionEntry>,
}

/// One line of the bot's decision log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionEntry {
    #[serde(default)]
    pub timestamp: RawTimestamp,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: String,
}

// ---------------------------------------------------------------------------
// Lenient decoding: one bad entry never fails the whole payload
// ---------------------------------------------------------------------------

/// Decode each element on its own; elements that don't fit are dropped.
fn decode_elements<T: DeserializeOwned>(value: Value) -> Option<Vec<T>> {
    let Value::Array(items) = value else {
        return None;
    };

    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();

    let dropped = total - decoded.len();
    if dropped > 0 {
        tracing::warn!(dropped, total, "Dropped malformed entries from status payload");
    }
    Some(decoded)
}

fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(decode_elements(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_opt_vec<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(decode_elements(Value::deserialize(deserializer)?))
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(value.filter(|v| v.is_finite()))
}

fn lenient_prices<'de, D>(deserializer: D) -> Result<BTreeMap<String, Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(map) = Value::deserialize(deserializer)? else {
        return Ok(BTreeMap::new());
    };
    Ok(map
        .into_iter()
        .filter_map(|(label, price)| decimal_from_value(&price).map(|p| (label, p)))
        .collect())
}
