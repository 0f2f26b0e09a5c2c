//! Domain entities carried between sessions.

use super::value_object::ParticipantId;

/// A chat message in flight
///
/// The sender's display name is a snapshot taken when the message was sent;
/// later renames never touch messages that were already fanned out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender_id: ParticipantId,
    pub sender_name: Option<String>,
    pub content: String,
}

impl ChatMessage {
    pub fn new(sender_id: ParticipantId, sender_name: Option<String>, content: String) -> Self {
        Self {
            sender_id,
            sender_name,
            content,
        }
    }
}

/// Events queued on a session's outbound channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    /// The session's own current display name, sent once on join
    YourName(Option<String>),
    /// A message broadcast in the session's room
    NewMessage(ChatMessage),
}

/// Read-only view of a session, used by the inspection API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantSnapshot {
    pub id: ParticipantId,
    pub display_name: Option<String>,
}
