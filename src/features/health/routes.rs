use axum::{
    routing::{any, get},
    Router,
};

use crate::features::health::handlers;

/// Create routes for the liveness probes (public, stateless)
pub fn routes() -> Router {
    Router::new()
        .route("/api/health", get(handlers::health_check))
        .route("/api/test", any(handlers::test_probe))
}
