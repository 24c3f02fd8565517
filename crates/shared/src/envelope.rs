//! Transport envelope and routing vocabulary.

use serde::{Deserialize, Serialize};

use crate::messages::BrokerMessage;

/// Queue portal requests are consumed from.
pub const REQUESTS_QUEUE: &str = "portals-requests";

/// Routing key inbound portal requests are bound to.
pub const REQUESTS_ROUTING_KEY: &str = "requests.portals";

/// Routing key answers are published under when no reply target is given.
pub const ANSWERS_ROUTING_KEY: &str = "answers.portals";

/// A message as delivered by the transport, with the metadata needed to answer it.
///
/// `correlation_id` and `reply_to` are opaque: they are only ever echoed back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub correlation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    pub message: BrokerMessage,
}

impl Delivery {
    pub fn new(correlation_id: impl Into<String>, message: BrokerMessage) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            reply_to: None,
            message,
        }
    }

    pub fn with_reply_to(mut self, reply_to: impl Into<String>) -> Self {
        self.reply_to = Some(reply_to.into());
        self
    }

    /// Reply target, ignoring blank values.
    pub fn reply_target(&self) -> Option<&str> {
        self.reply_to
            .as_deref()
            .map(str::trim)
            .filter(|target| !target.is_empty())
    }
}
