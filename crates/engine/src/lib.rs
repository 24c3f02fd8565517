//! Warpgate Engine library.
//!
//! Answers portal position requests with data from dofus-portals.
//!
//! ## Structure
//!
//! - `repositories/` - Reference caches built from the data store
//! - `use_cases/` - Request orchestration
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP and WebSocket entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod repositories;
pub mod use_cases;

pub use app::App;
