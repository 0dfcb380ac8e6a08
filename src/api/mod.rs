//! API module
//!
//! HTTP API endpoints and middleware.

pub mod middleware;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::{middleware as axum_middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub use routes::create_router;
pub use state::AppState;

/// Build the full application router over the given state.
///
/// Layer order: trace -> context -> logging -> handler.
pub fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = create_router().layer(
        ServiceBuilder::new()
            .layer(axum_middleware::from_fn(middleware::context_middleware))
            .layer(axum_middleware::from_fn(middleware::logging_middleware)),
    );

    Router::new()
        .route("/health", get(health_check))
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
