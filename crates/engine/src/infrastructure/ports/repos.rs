//! Repository port for the reference tables.

use async_trait::async_trait;
use warpgate_domain::{Area, Dimension, Server, SubArea, TransportType};

use super::error::RepoError;

// =============================================================================
// Reference Tables
// =============================================================================

/// Full-table reads of every internal/provider identifier pair.
///
/// Rows are returned in the store's read order. Each method is called once at startup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceDataRepo: Send + Sync {
    async fn list_servers(&self) -> Result<Vec<Server>, RepoError>;
    async fn list_dimensions(&self) -> Result<Vec<Dimension>, RepoError>;
    async fn list_areas(&self) -> Result<Vec<Area>, RepoError>;
    async fn list_sub_areas(&self) -> Result<Vec<SubArea>, RepoError>;
    async fn list_transport_types(&self) -> Result<Vec<TransportType>, RepoError>;
}
