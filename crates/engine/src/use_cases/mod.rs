//! Use cases - request orchestration.
//!
//! Use cases drive the port traits; transports hand them work.

pub mod portals;

pub use portals::{HandlePortalRequest, PortalRequestError};
