//! HTTP routes.

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::app::App;

/// Create all HTTP routes.
///
/// Only served once the reference caches are loaded, so a live route means ready.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}
