//! Error types for port operations.

use std::time::Duration;

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Database operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },
}

impl RepoError {
    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }
}

/// Failures talking to the portal provider. Every variant fails the request.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("Provider request failed: {0}")]
    Transport(String),
    #[error("Provider request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Provider answered with status {0}")]
    Status(u16),
    #[error("Invalid provider payload: {0}")]
    Decode(String),
}

/// Failures emitting a message on the broker.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BrokerError {
    #[error("Unknown reply target: {0}")]
    UnknownReplyTarget(String),
    #[error("Connection {0} is closed or saturated")]
    ChannelClosed(String),
}
