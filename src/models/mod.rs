pub mod equity;
pub mod status;
pub mod trade;

pub use equity::{EquityCurve, EquityPoint};
pub use status::{DecisionEntry, StatusPayload};
pub use trade::{RawTimestamp, TradeOutcome, TradeRecord};

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// TradeSource: which feed a reconciled record came from
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSource {
    /// The bot's own execution log (`trades`).
    Primary,
    /// The analytics position-closure feed (`analyticsTrades`).
    Secondary,
}

impl fmt::Display for TradeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSource::Primary => write!(f, "primary"),
            TradeSource::Secondary => write!(f, "secondary"),
        }
    }
}

// ---------------------------------------------------------------------------
// ReconciledTradeRecord: one surviving record per (market, side)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledTradeRecord {
    /// The winning record, with `side` replaced by its canonical label.
    #[serde(flatten)]
    pub record: TradeRecord,
    pub source: TradeSource,
}
