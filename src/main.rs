use tokio::sync::broadcast;

use botdash::api::router::create_router;
use botdash::api::ws_types::WsMessage;
use botdash::bot::StatusClient;
use botdash::config::AppConfig;
use botdash::metrics::init_metrics;
use botdash::services::poller::run_status_poller;
use botdash::services::snapshot::SnapshotStore;
use botdash::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);
    let metrics_handle = init_metrics();

    let client = StatusClient::with_timeout(config.bot_status_url.clone(), config.request_timeout())?;
    let snapshots = SnapshotStore::new();

    // --- WebSocket broadcast channel for dashboard ---
    let (ws_tx, _) = broadcast::channel::<WsMessage>(64);

    // --- Status poller: bot endpoint → snapshot store → sockets ---
    {
        let client = client.clone();
        let snapshots = snapshots.clone();
        let ws_tx = ws_tx.clone();
        let schedule = config.poll_schedule();
        tokio::spawn(async move {
            run_status_poller(client, snapshots, ws_tx, schedule).await;
        });
    }

    let state = AppState {
        config,
        client,
        snapshots,
        ws_tx,
        metrics_handle,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Dashboard listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}
