//! Repository modules - Data access wrappers around port traits.
//!
//! Each repository wraps a port trait and provides the interface
//! use cases rely on.

pub mod reference;

pub use reference::ReferenceCaches;
