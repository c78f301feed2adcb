use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;
use super::handlers;

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/dashboard", get(handlers::dashboard::snapshot))
        .route("/api/refresh", post(handlers::dashboard::refresh))
        .route("/api/equity-curve", get(handlers::analytics::equity_curve))
        .route("/api/summary", get(handlers::analytics::summary))
        .route("/api/trades", get(handlers::trades::list))
        .route("/ws", get(handlers::ws::handler));

    let public = Router::new()
        .route("/", get(handlers::page::index))
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::scrape));

    // Read-only surface, so any origin may embed it.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(api)
        .fallback(handlers::dashboard::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
