//! Warpgate Domain - vocabulary shared by the engine and the wire protocol.
//!
//! - `reference` - internal/provider identifier pairs (servers, dimensions, areas, ...)
//! - `provenance` - attribution attached to republished portal positions

pub mod provenance;
pub mod reference;

pub use provenance::PortalSource;
pub use reference::{Area, Dimension, ReferenceEntity, Server, SubArea, TransportType};
