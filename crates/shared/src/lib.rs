//! Warpgate Protocol - wire types shared with the rest of the bot.
//!
//! This crate contains every type that crosses the broker:
//! - Broker messages (`BrokerMessage`, portal request/answer bodies)
//! - The transport envelope (`Delivery`) and routing keys
//! - WebSocket frames used by the broker transport
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - only serde, serde_json and chrono
//! 2. **No business logic** - pure data types and serialization

pub mod envelope;
pub mod frames;
pub mod messages;

pub use envelope::{Delivery, ANSWERS_ROUTING_KEY, REQUESTS_QUEUE, REQUESTS_ROUTING_KEY};
pub use frames::{ClientFrame, ServerFrame};
pub use messages::{
    BrokerMessage, Language, MessageStatus, MessageType, PortalPositionAnswer,
    PortalPositionData, PortalPositionRequest, PositionData, TransportData,
};
