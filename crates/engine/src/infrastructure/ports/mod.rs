//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Reference tables (could swap MySQL -> anything with full-table reads)
//! - The portal provider (dofus-portals today)
//! - The message broker (WebSocket transport today)

mod error;
mod external;
mod repos;
pub mod types;

pub use error::{BrokerError, ProviderError, RepoError};
pub use external::{MessageBrokerPort, PortalProviderPort};
pub use repos::ReferenceDataRepo;
pub use types::{ProviderPortal, ProviderPosition, ProviderTransport, ProviderUser};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::{MockMessageBrokerPort, MockPortalProviderPort};
#[cfg(test)]
pub use repos::MockReferenceDataRepo;
