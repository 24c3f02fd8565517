//! Connection management for WebSocket broker clients.
//!
//! Tracks connected clients, their outbound channels and the routing keys they
//! subscribed to.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use uuid::Uuid;

use warpgate_shared::ServerFrame;

/// A connected client.
struct Connection {
    sender: mpsc::Sender<ServerFrame>,
    subscriptions: HashSet<String>,
}

/// Manages all active WebSocket connections.
pub struct ConnectionManager {
    connections: DashMap<Uuid, Connection>,
}

pub type SharedConnectionManager = Arc<ConnectionManager>;

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Register a new connection.
    pub fn register(&self, connection_id: Uuid, sender: mpsc::Sender<ServerFrame>) {
        self.connections.insert(
            connection_id,
            Connection {
                sender,
                subscriptions: HashSet::new(),
            },
        );
        tracing::debug!(connection_id = %connection_id, "Connection registered");
    }

    /// Unregister a connection.
    pub fn unregister(&self, connection_id: Uuid) {
        if self.connections.remove(&connection_id).is_some() {
            tracing::debug!(connection_id = %connection_id, "Connection unregistered");
        }
    }

    /// Bind a connection to a routing key.
    pub fn subscribe(
        &self,
        connection_id: Uuid,
        routing_key: impl Into<String>,
    ) -> Result<(), ConnectionError> {
        let mut connection = self
            .connections
            .get_mut(&connection_id)
            .ok_or(ConnectionError::NotFound)?;
        let routing_key = routing_key.into();
        tracing::info!(
            connection_id = %connection_id,
            routing_key = %routing_key,
            "Connection subscribed"
        );
        connection.subscriptions.insert(routing_key);
        Ok(())
    }

    /// Send a frame to one connection.
    pub fn send_to(&self, connection_id: Uuid, frame: ServerFrame) -> Result<(), ConnectionError> {
        let connection = self
            .connections
            .get(&connection_id)
            .ok_or(ConnectionError::NotFound)?;
        connection
            .sender
            .try_send(frame)
            .map_err(|_| ConnectionError::ChannelUnavailable)
    }

    /// Send a frame to every connection subscribed to `routing_key`.
    ///
    /// Returns how many connections accepted it.
    pub fn broadcast(&self, routing_key: &str, frame: ServerFrame) -> usize {
        let mut delivered = 0;
        for entry in self.connections.iter() {
            if !entry.subscriptions.contains(routing_key) {
                continue;
            }
            match entry.sender.try_send(frame.clone()) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::warn!(
                        connection_id = %entry.key(),
                        error = %e,
                        "Failed to broadcast frame"
                    );
                }
            }
        }
        delivered
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur during connection operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConnectionError {
    #[error("Connection not found")]
    NotFound,
    #[error("Connection channel is full or closed")]
    ChannelUnavailable,
}
