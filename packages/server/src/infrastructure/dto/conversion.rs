//! Conversion logic between DTOs and domain entities.

use huddle_shared::time::timestamp_to_rfc3339;

use crate::domain::{ChatMessage, OutboundEvent, ParticipantSnapshot, Room};
use crate::infrastructure::dto::{
    http::{ParticipantDetailDto, RoomDetailDto, RoomSummaryDto},
    websocket::{ChatMessageDto, ServerMessage},
};

// ========================================
// Domain Entity → DTO
// ========================================

impl From<ChatMessage> for ChatMessageDto {
    fn from(model: ChatMessage) -> Self {
        Self {
            user_id: model.sender_id.value(),
            user_name: model.sender_name,
            content: model.content,
        }
    }
}

impl From<OutboundEvent> for ServerMessage {
    fn from(event: OutboundEvent) -> Self {
        match event {
            OutboundEvent::YourName(name) => Self::YourName(name),
            OutboundEvent::NewMessage(message) => Self::NewMessage(message.into()),
        }
    }
}

impl From<ParticipantSnapshot> for ParticipantDetailDto {
    fn from(model: ParticipantSnapshot) -> Self {
        Self {
            user_id: model.id.value(),
            user_name: model.display_name,
        }
    }
}

impl RoomSummaryDto {
    pub async fn from_room(room: &Room) -> Self {
        Self {
            key: room.key().to_string(),
            participants: room.participant_count().await,
            created_at: timestamp_to_rfc3339(room.created_at().value()),
        }
    }
}

impl RoomDetailDto {
    pub async fn from_room(room: &Room) -> Self {
        Self {
            key: room.key().to_string(),
            created_at: timestamp_to_rfc3339(room.created_at().value()),
            participants: room
                .participants()
                .await
                .into_iter()
                .map(ParticipantDetailDto::from)
                .collect(),
        }
    }
}
