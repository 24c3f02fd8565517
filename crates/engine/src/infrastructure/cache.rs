//! Read-only bidirectional lookup cache for reference entities.
//!
//! Built once from a full-table read and never mutated afterwards, so it can be shared
//! across concurrent requests behind an `Arc` without any locking.

use std::collections::HashMap;

use warpgate_domain::ReferenceEntity;

/// Index of one entity type by internal identifier and by provider identifier.
///
/// The two indexes are independent. When several records share a provider identifier,
/// the provider index keeps the last one in input order.
#[derive(Debug, Clone)]
pub struct LookupCache<E> {
    by_id: HashMap<String, E>,
    by_external_id: HashMap<String, E>,
}

impl<E: ReferenceEntity> LookupCache<E> {
    /// Build both indexes from the complete record set.
    pub fn build(records: impl IntoIterator<Item = E>) -> Self {
        let mut by_id = HashMap::new();
        let mut by_external_id = HashMap::new();

        for record in records {
            by_external_id.insert(record.external_id().to_string(), record.clone());
            by_id.insert(record.id().to_string(), record);
        }

        Self {
            by_id,
            by_external_id,
        }
    }

    /// Look a record up by internal identifier.
    pub fn get(&self, id: &str) -> Option<&E> {
        self.by_id.get(id)
    }

    /// Look a record up by provider identifier.
    pub fn find_by_external_id(&self, external_id: &str) -> Option<&E> {
        self.by_external_id.get(external_id)
    }

    /// Translate an internal identifier to the provider's.
    ///
    /// Unknown identifiers are returned unchanged.
    pub fn resolve_external_id(&self, id: &str) -> String {
        match self.get(id) {
            Some(record) => record.external_id().to_string(),
            None => {
                tracing::warn!(
                    entity = E::KIND,
                    id = %id,
                    "Internal id not found, using it as dofus-portals id"
                );
                id.to_string()
            }
        }
    }

    /// Translate a provider identifier to ours.
    ///
    /// Unknown identifiers are returned unchanged.
    pub fn resolve_id(&self, external_id: &str) -> String {
        match self.find_by_external_id(external_id) {
            Some(record) => record.id().to_string(),
            None => {
                tracing::warn!(
                    entity = E::KIND,
                    external_id = %external_id,
                    "Dofus-portals id not found, using it as internal id"
                );
                external_id.to_string()
            }
        }
    }

    /// Number of distinct internal identifiers.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
