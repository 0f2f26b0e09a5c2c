//! Message formatting utilities for client display.

use huddle_server::infrastructure::dto::websocket::ChatMessageDto;
use huddle_shared::time::timestamp_to_clock_time;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the banner shown once connected
    pub fn format_connected(key: &str, id: u32) -> String {
        format!(
            "\nJoined room '{}' as #{}. Type messages and press Enter to send.\n\
             Use /name <name> to change your display name. Press Ctrl+C to exit.\n",
            key, id
        )
    }

    /// Format the `your_name` message sent right after joining
    pub fn format_your_name(name: Option<&str>) -> String {
        match name {
            Some(name) => format!("\nYour display name is '{}'\n", name),
            None => "\nYou have no display name yet\n".to_string(),
        }
    }

    /// Format a chat message
    ///
    /// # Arguments
    ///
    /// * `message` - The broadcast message
    /// * `own_id` - This client's participant id (to mark as "me")
    /// * `received_at` - Unix timestamp when the message arrived (milliseconds)
    pub fn format_chat_message(message: &ChatMessageDto, own_id: u32, received_at: i64) -> String {
        let sender = match &message.user_name {
            Some(name) => format!("{} (#{})", name, message.user_id),
            None => format!("#{}", message.user_id),
        };
        let me_suffix = if message.user_id == own_id { " (me)" } else { "" };
        format!(
            "\n[{}] {}{}: {}\n",
            timestamp_to_clock_time(received_at),
            sender,
            me_suffix,
            message.content
        )
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
