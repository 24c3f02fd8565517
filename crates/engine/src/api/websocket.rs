//! WebSocket handling for broker clients.
//!
//! Each connection is announced its id in a `Welcome` frame. That id is the reply target
//! a client puts in `Deliver.reply_to` to get answers back on the same socket.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use warpgate_shared::{ClientFrame, ServerFrame, REQUESTS_ROUTING_KEY};

use super::connections::SharedConnectionManager;
use crate::app::App;

/// Buffer size for per-connection message channel.
const CONNECTION_CHANNEL_BUFFER: usize = 256;

/// Combined state for WebSocket handlers.
pub struct WsState {
    pub app: Arc<App>,
    pub connections: SharedConnectionManager,
}

/// WebSocket upgrade handler - entry point for new connections.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<WsState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an individual WebSocket connection.
async fn handle_socket(socket: WebSocket, state: Arc<WsState>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let connection_id = Uuid::new_v4();

    // Create a bounded channel for sending frames to this client
    let (tx, mut rx) = mpsc::channel::<ServerFrame>(CONNECTION_CHANNEL_BUFFER);

    state.connections.register(connection_id, tx.clone());
    tracing::info!(connection_id = %connection_id, "WebSocket connection established");

    let _ = tx.try_send(ServerFrame::Welcome {
        connection_id: connection_id.to_string(),
    });

    // Forward frames from the channel to the WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            match serde_json::to_string(&frame) {
                Ok(json) => {
                    if ws_sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize server frame");
                }
            }
        }
    });

    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientFrame>(&text) {
                Ok(frame) => {
                    if let Some(response) = handle_frame(frame, &state, connection_id) {
                        if tx.try_send(response).is_err() {
                            tracing::warn!(
                                connection_id = %connection_id,
                                "Failed to send response, channel full or closed"
                            );
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(connection_id = %connection_id, error = %e, "Failed to parse frame");
                    let _ = tx.try_send(ServerFrame::Error {
                        code: "PARSE_ERROR".to_string(),
                        message: format!("Invalid frame format: {}", e),
                    });
                }
            },
            Ok(Message::Close(_)) => {
                tracing::info!(connection_id = %connection_id, "WebSocket closed by client");
                break;
            }
            Err(e) => {
                tracing::error!(connection_id = %connection_id, error = %e, "WebSocket error");
                break;
            }
            _ => {}
        }
    }

    state.connections.unregister(connection_id);
    send_task.abort();

    tracing::info!(connection_id = %connection_id, "WebSocket connection terminated");
}

/// Dispatch a parsed client frame. Returns the immediate response, if any.
fn handle_frame(frame: ClientFrame, state: &WsState, connection_id: Uuid) -> Option<ServerFrame> {
    match frame {
        ClientFrame::Heartbeat => Some(ServerFrame::Pong),

        ClientFrame::Subscribe { routing_key } => state
            .connections
            .subscribe(connection_id, routing_key)
            .err()
            .map(|e| ServerFrame::Error {
                code: "SUBSCRIBE_FAILED".to_string(),
                message: e.to_string(),
            }),

        ClientFrame::Deliver {
            routing_key,
            correlation_id,
            reply_to,
            message,
        } => {
            if routing_key != REQUESTS_ROUTING_KEY {
                tracing::warn!(
                    connection_id = %connection_id,
                    routing_key = %routing_key,
                    "No consumer bound to routing key"
                );
                return Some(ServerFrame::Error {
                    code: "UNROUTABLE".to_string(),
                    message: format!("No consumer bound to routing key {}", routing_key),
                });
            }

            let portals = state.app.use_cases.portals.clone();
            tokio::spawn(async move {
                portals.execute_raw(correlation_id, reply_to, message).await;
            });
            None
        }
    }
}
