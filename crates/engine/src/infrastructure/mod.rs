//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod cache;
pub mod config;
pub mod dofus_portals;
pub mod mysql;
pub mod ports;
