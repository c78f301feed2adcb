use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// RawTimestamp
// ---------------------------------------------------------------------------

/// Timestamp as the bot sent it. The local execution log uses ISO-8601
/// strings, the analytics feed uses unix seconds.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawTimestamp {
    Text(String),
    Seconds(f64),
    #[default]
    Missing,
}

impl RawTimestamp {
    /// Parse into an instant. `None` means "earliest possible" and sorts
    /// before every parsed instant.
    pub fn parse(&self) -> Option<DateTime<Utc>> {
        match self {
            RawTimestamp::Text(s) => parse_text_timestamp(s),
            RawTimestamp::Seconds(secs) => from_unix_seconds(*secs),
            RawTimestamp::Missing => None,
        }
    }
}

fn parse_text_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // Zone-less ISO forms are taken as UTC.
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }

    s.parse::<f64>().ok().and_then(from_unix_seconds)
}

fn from_unix_seconds(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let millis = (secs * 1000.0).round();
    if millis.abs() >= i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64)
}

impl From<Value> for RawTimestamp {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => RawTimestamp::Text(s),
            Value::Number(n) => n
                .as_f64()
                .map(RawTimestamp::Seconds)
                .unwrap_or(RawTimestamp::Missing),
            _ => RawTimestamp::Missing,
        }
    }
}

impl<'de> Deserialize<'de> for RawTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Value::deserialize(deserializer)?.into())
    }
}

impl Serialize for RawTimestamp {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RawTimestamp::Text(s) => serializer.serialize_str(s),
            RawTimestamp::Seconds(secs) => serializer.serialize_f64(*secs),
            RawTimestamp::Missing => serializer.serialize_none(),
        }
    }
}

// ---------------------------------------------------------------------------
// TradeOutcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", from = "Value")]
pub enum TradeOutcome {
    Win,
    Loss,
    #[default]
    Pending,
    Timeout,
    Rejected,
}

impl TradeOutcome {
    pub fn from_api_str(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "WIN" => TradeOutcome::Win,
            "LOSS" => TradeOutcome::Loss,
            "TIMEOUT" => TradeOutcome::Timeout,
            "REJECTED" => TradeOutcome::Rejected,
            // Unknown labels stay unrealized.
            _ => TradeOutcome::Pending,
        }
    }

    /// Win or loss: the pnl is final and may be summed.
    pub fn is_realized(self) -> bool {
        matches!(self, TradeOutcome::Win | TradeOutcome::Loss)
    }
}

impl From<Value> for TradeOutcome {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => TradeOutcome::from_api_str(&s),
            _ => TradeOutcome::Pending,
        }
    }
}

impl fmt::Display for TradeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeOutcome::Win => write!(f, "WIN"),
            TradeOutcome::Loss => write!(f, "LOSS"),
            TradeOutcome::Pending => write!(f, "PENDING"),
            TradeOutcome::Timeout => write!(f, "TIMEOUT"),
            TradeOutcome::Rejected => write!(f, "REJECTED"),
        }
    }
}

// ---------------------------------------------------------------------------
// TradeRecord: one execution or closed position, as reported by the bot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    #[serde(default)]
    pub timestamp: RawTimestamp,
    #[serde(default, deserialize_with = "lenient_string")]
    pub market_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub side: String,
    #[serde(default, deserialize_with = "lenient_decimal_or_zero")]
    pub entry_price: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal_or_zero")]
    pub size: Decimal,
    #[serde(default)]
    pub result: TradeOutcome,
    /// `None` when the bot sent something that is not a finite number.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub pnl: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<RawTimestamp>,
    /// True once on-chain settlement went through.
    #[serde(
        default,
        deserialize_with = "lenient_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub redeemed: Option<bool>,
}

impl TradeRecord {
    /// Pnl that may enter a running sum: present and resolved.
    pub fn realized_pnl(&self) -> Option<Decimal> {
        if self.result.is_realized() {
            self.pnl
        } else {
            None
        }
    }
}

/// Decimal from a JSON number or numeric string. Anything else is `None`.
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

pub(crate) fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(decimal_from_value(&value))
}

fn lenient_decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_decimal(deserializer)?.unwrap_or(Decimal::ZERO))
}

pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Bool from `true`/`false`, `1`/`0` or the usual string spellings.
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => Some(b),
        Value::Number(n) => match n.as_f64() {
            Some(v) if v == 1.0 => Some(true),
            Some(v) if v == 0.0 => Some(false),
            _ => None,
        },
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    })
}
