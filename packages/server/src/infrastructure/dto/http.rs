//! HTTP API response bodies.

use serde::{Deserialize, Serialize};

/// Entry of `GET /api/rooms`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub key: String,
    pub participants: usize,
    /// RFC 3339
    pub created_at: String,
}

/// Body of `GET /api/rooms/{key}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub key: String,
    pub created_at: String,
    pub participants: Vec<ParticipantDetailDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantDetailDto {
    pub user_id: u32,
    pub user_name: Option<String>,
}
