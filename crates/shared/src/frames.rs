//! WebSocket frames for the broker transport.
//!
//! Clients deliver broker messages and subscribe to routing keys; the engine pushes
//! published or replied messages back as `ServerFrame::Message`.

use serde::{Deserialize, Serialize};

use crate::messages::BrokerMessage;

/// Frames sent by a broker client to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientFrame {
    /// Deliver a message under a routing key.
    ///
    /// `message` stays raw so a body that is not a valid [`BrokerMessage`] can still be
    /// answered under its correlation id.
    Deliver {
        routing_key: String,
        correlation_id: String,
        #[serde(default)]
        reply_to: Option<String>,
        message: serde_json::Value,
    },
    /// Receive every message later published under `routing_key`.
    Subscribe { routing_key: String },
    Heartbeat,
}

/// Frames sent by the engine to a broker client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerFrame {
    /// Sent once after the upgrade; `connection_id` is this client's reply target.
    Welcome { connection_id: String },
    /// A published (`routing_key` set) or replied (`routing_key` absent) message.
    Message {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        routing_key: Option<String>,
        correlation_id: String,
        message: BrokerMessage,
    },
    Pong,
    Error { code: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::MessageType;

    #[test]
    fn deliver_frame_accepts_an_undecodable_body() {
        let json = r#"{
            "type": "Deliver",
            "routing_key": "requests.portals",
            "correlation_id": "abc",
            "reply_to": "conn-1",
            "message": { "type": "PORTAL_POSITION_REQUEST", "portalPositionRequest": { "server": null } }
        }"#;

        let frame: ClientFrame = serde_json::from_str(json).unwrap();

        match frame {
            ClientFrame::Deliver {
                correlation_id,
                reply_to,
                message,
                ..
            } => {
                assert_eq!(correlation_id, "abc");
                assert_eq!(reply_to.as_deref(), Some("conn-1"));
                assert!(serde_json::from_value::<BrokerMessage>(message).is_err());
            }
            other => panic!("Expected Deliver, got {:?}", other),
        }
    }

    #[test]
    fn deliver_frame_parses_without_reply_to() {
        let json = r#"{
            "type": "Deliver",
            "routing_key": "requests.portals",
            "correlation_id": "abc",
            "message": { "type": "PORTAL_POSITION_REQUEST", "portalPositionRequest": { "server": "s1" } }
        }"#;

        let frame: ClientFrame = serde_json::from_str(json).unwrap();

        match frame {
            ClientFrame::Deliver {
                routing_key,
                correlation_id,
                reply_to,
                message,
            } => {
                assert_eq!(routing_key, "requests.portals");
                assert_eq!(correlation_id, "abc");
                assert!(reply_to.is_none());
                let message: BrokerMessage = serde_json::from_value(message).unwrap();
                assert_eq!(message.kind, MessageType::PortalPositionRequest);
            }
            other => panic!("Expected Deliver, got {:?}", other),
        }
    }

    #[test]
    fn replied_message_omits_routing_key() {
        let frame = ServerFrame::Message {
            routing_key: None,
            correlation_id: "abc".to_string(),
            message: BrokerMessage::default(),
        };

        let value = serde_json::to_value(&frame).unwrap();

        assert_eq!(value["type"], "Message");
        assert!(value.get("routing_key").is_none());
    }
}
