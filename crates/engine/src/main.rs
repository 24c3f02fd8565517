//! Warpgate Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use warpgate_engine::api::{self, websocket::WsState, ConnectionManager};
use warpgate_engine::infrastructure::config::AppConfig;
use warpgate_engine::App;
use warpgate_shared::{REQUESTS_QUEUE, REQUESTS_ROUTING_KEY};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may be started from `crates/engine`).
    load_dotenv_from_repo_root();

    let config = AppConfig::from_env()?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "warpgate_engine={level},tower_http={level}",
                    level = config.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(config = ?config, "Starting Warpgate Engine");

    let connections = Arc::new(ConnectionManager::new());

    // Reference caches are loaded here; a failure stops startup.
    let app = Arc::new(App::bootstrap(&config, connections.clone()).await?);

    let ws_state = Arc::new(WsState {
        app: app.clone(),
        connections,
    });

    // Build router with separate states for HTTP and WebSocket
    let router = api::http::routes()
        .with_state(app)
        .route("/ws", get(api::websocket::ws_handler).with_state(ws_state))
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        queue = REQUESTS_QUEUE,
        routing_key = REQUESTS_ROUTING_KEY,
        "Listening on {}",
        addr
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Warpgate Engine is no longer running");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
