//! API layer - HTTP and WebSocket entry points.

pub mod broker;
pub mod connections;
pub mod http;
pub mod websocket;

pub use broker::WsBroker;
pub use connections::{ConnectionManager, SharedConnectionManager};
