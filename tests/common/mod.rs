use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::broadcast;

use botdash::api::router::create_router;
use botdash::api::ws_types::WsMessage;
use botdash::bot::StatusClient;
use botdash::config::AppConfig;
use botdash::services::snapshot::SnapshotStore;
use botdash::AppState;

/// Serve `body` as the bot's status endpoint on an ephemeral port.
/// Returns the endpoint URL.
#[allow(dead_code)]
pub async fn spawn_mock_bot(body: Value) -> String {
    let app = Router::new().route(
        "/status",
        get(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    );
    spawn_router(app).await
}

/// Serve a non-JSON body to exercise decode failures.
#[allow(dead_code)]
pub async fn spawn_garbage_bot() -> String {
    let app = Router::new().route("/status", get(|| async { "<html>maintenance</html>" }));
    spawn_router(app).await
}

async fn spawn_router(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock bot");
    let addr = listener.local_addr().expect("mock bot address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    format!("http://{addr}/status")
}

/// URL on a port nothing listens on.
#[allow(dead_code)]
pub async fn dead_bot_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind free port");
    let addr = listener.local_addr().expect("free port address");
    drop(listener);
    format!("http://{addr}/status")
}

/// A status payload with both trade feeds, a pending trade and a repeated
/// market that only reconciliation can collapse.
#[allow(dead_code)]
pub fn sample_payload() -> Value {
    json!({
        "trades": [
            {"timestamp": "2024-03-01T12:00:00Z", "marketId": "btc-up-1200", "side": "UP",
             "entryPrice": 0.52, "size": 10, "result": "WIN", "pnl": 8.5, "reason": "momentum"},
            {"timestamp": "2024-03-01T12:15:00Z", "marketId": "btc-up-1215", "side": "down",
             "entryPrice": 0.48, "size": 10, "result": "LOSS", "pnl": -4.8, "reason": "reversal"},
            {"timestamp": "2024-03-01T12:30:00Z", "marketId": "btc-up-1230", "side": "UP",
             "entryPrice": 0.61, "size": 10, "result": "PENDING", "pnl": 0}
        ],
        "analyticsTrades": [
            {"timestamp": 1709294400, "marketId": "btc-up-1200", "side": "YES",
             "entryPrice": 0.52, "size": 10, "result": "WIN", "pnl": 9.2, "redeemed": true}
        ],
        "equity": 104.4,
        "initialEquity": 100,
        "updatedAt": "2024-03-01T12:31:00Z",
        "uptimeSecs": 5400,
        "latencyMs": 180,
        "marketId": "btc-up-1230",
        "prices": {"YES": "0.61", "NO": "0.39"},
        "decisions": [{"timestamp": "2024-03-01T12:30:00Z", "message": "enter YES @ 0.61"}]
    })
}

#[allow(dead_code)]
pub fn test_config(bot_status_url: &str) -> AppConfig {
    AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        bot_status_url: bot_status_url.into(),
        poll_burst_interval_secs: 1,
        poll_burst_count: 0,
        poll_interval_secs: 60,
        request_timeout_secs: 2,
    }
}

#[allow(dead_code)]
pub fn build_test_app(bot_status_url: &str) -> (Router, AppState) {
    let config = test_config(bot_status_url);
    let client = StatusClient::with_timeout(bot_status_url, config.request_timeout())
        .expect("Failed to build status client");
    let (ws_tx, _) = broadcast::channel::<WsMessage>(16);

    let state = AppState {
        config,
        client,
        snapshots: SnapshotStore::new(),
        ws_tx,
        metrics_handle: botdash::metrics::init_metrics(),
    };

    (create_router(state.clone()), state)
}
