use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Cumulative account value at a whole-second instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityPoint {
    /// Unix seconds on the wire, which is what the chart widget consumes.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub time: DateTime<Utc>,
    pub value: Decimal,
}

/// Chart-ready equity series plus its high-water mark.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityCurve {
    pub points: Vec<EquityPoint>,
    pub all_time_high: Decimal,
}

impl EquityCurve {
    /// Value of the most recent point, if any.
    pub fn latest(&self) -> Option<Decimal> {
        self.points.last().map(|p| p.value)
    }

    /// Distance of the latest value below the all-time high.
    pub fn drawdown(&self) -> Decimal {
        self.latest()
            .map(|v| (self.all_time_high - v).max(Decimal::ZERO))
            .unwrap_or(Decimal::ZERO)
    }
}
