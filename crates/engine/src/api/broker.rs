//! WebSocket-backed message broker.
//!
//! Publishing fans out to subscribed connections; replying targets the connection whose
//! id the requester gave as its reply target.

use async_trait::async_trait;
use uuid::Uuid;

use warpgate_shared::{BrokerMessage, ServerFrame};

use super::connections::{ConnectionError, SharedConnectionManager};
use crate::infrastructure::ports::{BrokerError, MessageBrokerPort};

pub struct WsBroker {
    connections: SharedConnectionManager,
}

impl WsBroker {
    pub fn new(connections: SharedConnectionManager) -> Self {
        Self { connections }
    }
}

#[async_trait]
impl MessageBrokerPort for WsBroker {
    async fn publish(
        &self,
        message: BrokerMessage,
        routing_key: &str,
        correlation_id: &str,
    ) -> Result<(), BrokerError> {
        let frame = ServerFrame::Message {
            routing_key: Some(routing_key.to_string()),
            correlation_id: correlation_id.to_string(),
            message,
        };

        let delivered = self.connections.broadcast(routing_key, frame);
        if delivered == 0 {
            // Same as an unbound exchange: the message is dropped.
            tracing::debug!(
                routing_key = %routing_key,
                correlation_id = %correlation_id,
                "No subscriber for published message"
            );
        }
        Ok(())
    }

    async fn reply(
        &self,
        message: BrokerMessage,
        correlation_id: &str,
        reply_to: &str,
    ) -> Result<(), BrokerError> {
        let connection_id = Uuid::parse_str(reply_to)
            .map_err(|_| BrokerError::UnknownReplyTarget(reply_to.to_string()))?;

        let frame = ServerFrame::Message {
            routing_key: None,
            correlation_id: correlation_id.to_string(),
            message,
        };

        self.connections
            .send_to(connection_id, frame)
            .map_err(|e| match e {
                ConnectionError::NotFound => BrokerError::UnknownReplyTarget(reply_to.to_string()),
                ConnectionError::ChannelUnavailable => {
                    BrokerError::ChannelClosed(reply_to.to_string())
                }
            })
    }
}
