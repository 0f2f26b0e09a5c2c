//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use huddle_server::infrastructure::dto::websocket::ClientMessage;

use crate::error::ClientError;

/// Prefix of the rename command
pub const NAME_COMMAND: &str = "/name";

/// Turn one input line into the message to send.
///
/// `/name <name>` becomes `update_name`; every other non-empty line is a
/// `new_message`. Blank lines yield `None`.
pub fn parse_input(line: &str) -> Option<ClientMessage> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if line == NAME_COMMAND {
        return Some(ClientMessage::UpdateName(String::new()));
    }
    if let Some(name) = line.strip_prefix(NAME_COMMAND)
        && name.starts_with(char::is_whitespace)
    {
        return Some(ClientMessage::UpdateName(name.trim().to_string()));
    }

    Some(ClientMessage::NewMessage(line.to_string()))
}

/// Check if the client should exit immediately based on the error type.
///
/// A rejected handshake fails the same way on every retry.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(
        error,
        ClientError::HandshakeRejected { .. } | ClientError::ReconnectExhausted(_)
    )
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The number of failed attempts so far
/// * `max_attempts` - The maximum number of connection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    // Don't reconnect if the error requires immediate exit
    if should_exit_immediately(error) {
        return false;
    }

    // Don't reconnect if we've exhausted all attempts
    current_attempt < max_attempts
}
