//! Reference entities that pair an internal identifier with its dofus-portals counterpart.
//!
//! Every entity here is a plain `(id, external_id)` record read once from the data store.
//! They differ only in what they name, so they are generated by one macro and exposed
//! through the [`ReferenceEntity`] trait that the lookup caches are generic over.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A record that maps an internal identifier to the provider's identifier.
pub trait ReferenceEntity: Clone + Send + Sync + 'static {
    /// Human-readable entity kind, used in diagnostics.
    const KIND: &'static str;

    /// Build a record from its two identifiers.
    fn from_ids(id: String, external_id: String) -> Self;

    /// Identifier assigned by this system.
    fn id(&self) -> &str;

    /// Identifier assigned by dofus-portals.
    fn external_id(&self) -> &str;
}

macro_rules! define_reference_entity {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            pub id: String,
            pub external_id: String,
        }

        impl $name {
            pub fn new(id: impl Into<String>, external_id: impl Into<String>) -> Self {
                Self {
                    id: id.into(),
                    external_id: external_id.into(),
                }
            }
        }

        impl ReferenceEntity for $name {
            const KIND: &'static str = $kind;

            fn from_ids(id: String, external_id: String) -> Self {
                Self { id, external_id }
            }

            fn id(&self) -> &str {
                &self.id
            }

            fn external_id(&self) -> &str {
                &self.external_id
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} {} ({})", $kind, self.id, self.external_id)
            }
        }
    };
}

define_reference_entity!(
    /// A game server (e.g. a single Dofus server instance).
    Server,
    "server"
);
define_reference_entity!(
    /// A dimension reachable through portals.
    Dimension,
    "dimension"
);
define_reference_entity!(Area, "area");
define_reference_entity!(SubArea, "subArea");
define_reference_entity!(
    /// Means of transport near a portal (zaap, brigandin, ...).
    TransportType,
    "transportType"
);
