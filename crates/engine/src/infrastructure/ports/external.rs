//! External service port traits (portal provider, message broker).

use std::time::Duration;

use async_trait::async_trait;
use warpgate_shared::BrokerMessage;

use super::error::{BrokerError, ProviderError};
use super::types::ProviderPortal;

// =============================================================================
// Portal Provider
// =============================================================================

/// Read access to the portal provider. Identifiers are provider identifiers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortalProviderPort: Send + Sync {
    /// Every known portal of a server, one per dimension.
    async fn list_portals(
        &self,
        server_id: &str,
        timeout: Duration,
    ) -> Result<Vec<ProviderPortal>, ProviderError>;

    /// The portal of one dimension on one server.
    async fn get_portal(
        &self,
        server_id: &str,
        dimension_id: &str,
        timeout: Duration,
    ) -> Result<ProviderPortal, ProviderError>;
}

// =============================================================================
// Message Broker
// =============================================================================

/// Outbound side of the message channel.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageBrokerPort: Send + Sync {
    /// Publish to every consumer bound to `routing_key`.
    async fn publish(
        &self,
        message: BrokerMessage,
        routing_key: &str,
        correlation_id: &str,
    ) -> Result<(), BrokerError>;

    /// Send straight back to the requester's reply target.
    async fn reply(
        &self,
        message: BrokerMessage,
        correlation_id: &str,
        reply_to: &str,
    ) -> Result<(), BrokerError>;
}
