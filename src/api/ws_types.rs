use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::services::snapshot::DashboardSnapshot;

/// Messages broadcast to all connected WebSocket clients.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum WsMessage {
    #[serde(rename = "snapshot")]
    Snapshot(Box<DashboardSnapshot>),

    #[serde(rename = "unreachable")]
    Unreachable(UnreachableNotice),
}

#[derive(Debug, Clone, Serialize)]
pub struct UnreachableNotice {
    pub error: String,
    pub last_success: Option<DateTime<Utc>>,
}
