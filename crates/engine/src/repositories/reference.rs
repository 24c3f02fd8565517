//! Reference data, loaded once at startup.
//!
//! Holds one [`LookupCache`] per reference table. Loading is all-or-nothing: if any table
//! read fails, no caches are returned and the service must not start consuming.

use warpgate_domain::{Area, Dimension, Server, SubArea, TransportType};

use crate::infrastructure::cache::LookupCache;
use crate::infrastructure::ports::{ReferenceDataRepo, RepoError};

/// Identifier translation tables for every reference entity.
pub struct ReferenceCaches {
    pub servers: LookupCache<Server>,
    pub dimensions: LookupCache<Dimension>,
    pub areas: LookupCache<Area>,
    pub sub_areas: LookupCache<SubArea>,
    pub transport_types: LookupCache<TransportType>,
}

impl ReferenceCaches {
    /// Read every reference table once and index it.
    pub async fn load(repo: &dyn ReferenceDataRepo) -> Result<Self, RepoError> {
        let servers = LookupCache::build(repo.list_servers().await?);
        let dimensions = LookupCache::build(repo.list_dimensions().await?);
        let areas = LookupCache::build(repo.list_areas().await?);
        let sub_areas = LookupCache::build(repo.list_sub_areas().await?);
        let transport_types = LookupCache::build(repo.list_transport_types().await?);

        tracing::info!(
            servers = servers.len(),
            dimensions = dimensions.len(),
            areas = areas.len(),
            sub_areas = sub_areas.len(),
            transport_types = transport_types.len(),
            "Reference caches loaded"
        );

        Ok(Self {
            servers,
            dimensions,
            areas,
            sub_areas,
            transport_types,
        })
    }
}
