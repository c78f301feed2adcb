pub mod analytics;
pub mod api;
pub mod bot;
pub mod config;
pub mod errors;
pub mod format;
pub mod metrics;
pub mod models;
pub mod services;

use tokio::sync::broadcast;

use crate::api::ws_types::WsMessage;
use crate::bot::StatusClient;
use crate::config::AppConfig;
use crate::services::snapshot::SnapshotStore;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub client: StatusClient,
    pub snapshots: SnapshotStore,
    pub ws_tx: broadcast::Sender<WsMessage>,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}
