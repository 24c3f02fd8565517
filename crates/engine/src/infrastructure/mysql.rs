//! MySQL-backed reference tables.

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use warpgate_domain::{Area, Dimension, ReferenceEntity, Server, SubArea, TransportType};

use crate::infrastructure::config::MySqlConfig;
use crate::infrastructure::ports::{ReferenceDataRepo, RepoError};

/// Plain full-table reads over the shared reference schema.
///
/// Every table has an `id` column (ours) and a `dofus_portals_id` column (theirs).
/// Rows come back in scan order; no ordering is imposed.
pub struct MySqlReferenceRepo {
    pool: MySqlPool,
}

/// Credentials are passed as-is; nothing goes through a URL.
pub fn connect_options(config: &MySqlConfig) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.database)
}

impl MySqlReferenceRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Open a small pool; reference tables are only read during startup.
    pub async fn connect(config: &MySqlConfig) -> Result<Self, RepoError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(2)
            .connect_with(connect_options(config))
            .await
            .map_err(|e| RepoError::database("connect", e))?;

        Ok(Self::new(pool))
    }

    async fn list<E: ReferenceEntity>(
        &self,
        table: &'static str,
        operation: &'static str,
    ) -> Result<Vec<E>, RepoError> {
        let query = format!("SELECT id, dofus_portals_id FROM {table}");

        let rows: Vec<(String, String)> = sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database(operation, e))?;

        Ok(rows
            .into_iter()
            .map(|(id, external_id)| E::from_ids(id, external_id))
            .collect())
    }
}

#[async_trait]
impl ReferenceDataRepo for MySqlReferenceRepo {
    async fn list_servers(&self) -> Result<Vec<Server>, RepoError> {
        self.list("servers", "list_servers").await
    }

    async fn list_dimensions(&self) -> Result<Vec<Dimension>, RepoError> {
        self.list("dimensions", "list_dimensions").await
    }

    async fn list_areas(&self) -> Result<Vec<Area>, RepoError> {
        self.list("areas", "list_areas").await
    }

    async fn list_sub_areas(&self) -> Result<Vec<SubArea>, RepoError> {
        self.list("sub_areas", "list_sub_areas").await
    }

    async fn list_transport_types(&self) -> Result<Vec<TransportType>, RepoError> {
        self.list("transport_types", "list_transport_types").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_options_keep_reserved_characters() {
        let config = MySqlConfig {
            host: "db.internal".to_string(),
            port: 3307,
            user: "kaelly@bot".to_string(),
            password: "p@ss/w#rd:1".to_string(),
            database: "kaelly/bot".to_string(),
        };

        let options = connect_options(&config);

        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 3307);
        assert_eq!(options.get_username(), "kaelly@bot");
        assert_eq!(options.get_database(), Some("kaelly/bot"));
    }
}
