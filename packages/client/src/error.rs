//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server refused the upgrade (bad room key or participant id)
    #[error("Handshake rejected by server (HTTP {status})")]
    HandshakeRejected { status: u16 },

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Reconnection attempts were exhausted
    #[error("Gave up after {0} connection attempts")]
    ReconnectExhausted(u32),
}
