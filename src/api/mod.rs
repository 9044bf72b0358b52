//! HTTP API module for the go-cloud service
//!
//! # Endpoints
//! - `GET /` — service identity (JSON)
//! - `GET /healthz` — liveness probe
//! - `GET /readyz` — readiness probe

pub mod handlers;
mod middleware;
mod state;

use axum::{
    Router,
    handler::Handler,
    middleware::from_fn,
    routing::{MethodRouter, get},
};
use std::sync::Arc;

pub use middleware::log_requests;
pub use state::AppState;

/// Creates the main Axum router with all endpoints and request logging
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get_only(handlers::root))
        .route("/healthz", get_only(handlers::healthz))
        .route("/readyz", get_only(handlers::readyz))
        .fallback(handlers::fallback)
        .with_state(state)
        .layer(from_fn(log_requests))
}

/// GET route that rejects HEAD; axum would otherwise answer HEAD with
/// the GET handler.
fn get_only<H, T>(handler: H) -> MethodRouter<Arc<AppState>>
where
    H: Handler<T, Arc<AppState>>,
    T: 'static,
{
    get(handler).head(handlers::method_not_allowed)
}
