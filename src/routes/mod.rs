//! HTTP route handlers.
//!
//! Rarity results are random per request, so the rarity route sets
//! `Cache-Control: no-store`. Request tracing middleware generates a unique
//! request ID for each incoming request, allowing correlation of all logs
//! within a request.

pub mod health;
pub mod rarity;

use axum::{
    http::header::{HeaderValue, CACHE_CONTROL},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_RARITY;
use crate::middleware::{cors_layer, request_id_layer};
use crate::state::AppState;

/// Creates the Axum router with all routes, CORS, and cache headers.
pub fn create_router(state: AppState) -> Router {
    let rarity_routes = Router::new()
        .route("/check-rarity", post(rarity::check))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_RARITY),
        ));

    // Health check - no caching, always fresh for liveness probes
    let health_routes = Router::new().route("/health", get(health::health));

    let cors = cors_layer(&state.config.cors);

    Router::new()
        .merge(rarity_routes)
        .merge(health_routes)
        .with_state(state)
        .layer(cors)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
