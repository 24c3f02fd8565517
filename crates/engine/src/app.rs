//! Application state and composition.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use crate::api::{SharedConnectionManager, WsBroker};
use crate::infrastructure::{
    config::AppConfig,
    dofus_portals::DofusPortalsClient,
    mysql::MySqlReferenceRepo,
    ports::{MessageBrokerPort, PortalProviderPort},
};
use crate::repositories::ReferenceCaches;
use crate::use_cases::HandlePortalRequest;

/// Main application state.
///
/// Holds the use cases.
/// Passed to HTTP/WebSocket handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub portals: Arc<HandlePortalRequest>,
}

impl App {
    pub fn new(
        caches: Arc<ReferenceCaches>,
        provider: Arc<dyn PortalProviderPort>,
        broker: Arc<dyn MessageBrokerPort>,
        fetch_timeout: Duration,
    ) -> Self {
        let portals = Arc::new(HandlePortalRequest::new(
            caches,
            provider,
            broker,
            fetch_timeout,
        ));

        Self {
            use_cases: UseCases { portals },
        }
    }

    /// Load reference data and wire the production adapters.
    ///
    /// Fails if any reference table cannot be read; nothing is served in that case.
    pub async fn bootstrap(
        config: &AppConfig,
        connections: SharedConnectionManager,
    ) -> anyhow::Result<Self> {
        tracing::info!(
            host = %config.mysql.host,
            port = config.mysql.port,
            "Connecting to MySQL"
        );
        let repo = MySqlReferenceRepo::connect(&config.mysql)
            .await
            .context("Failed to connect to MySQL")?;

        let caches = ReferenceCaches::load(&repo)
            .await
            .context("Failed to load reference caches")?;

        let provider = Arc::new(DofusPortalsClient::new(&config.dofus_portals));
        let broker = Arc::new(WsBroker::new(connections));

        Ok(Self::new(
            Arc::new(caches),
            provider,
            broker,
            config.dofus_portals.timeout,
        ))
    }
}
