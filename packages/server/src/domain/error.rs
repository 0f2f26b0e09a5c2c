//! Domain errors.

use thiserror::Error;

/// 値オブジェクトの生成に失敗した場合のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// Room key is not exactly 5 lowercase ASCII letters
    #[error("invalid room key '{0}': expected exactly 5 lowercase letters")]
    InvalidRoomKey(String),

    /// Participant id is not a decimal integer in 0..=4294967295
    #[error("invalid participant id '{0}': expected an integer in 0..=4294967295")]
    InvalidParticipantId(String),
}

/// Room 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    /// The room has been removed from the registry and accepts no more joins
    #[error("room '{0}' has been retired")]
    Retired(String),

    /// The session handle does not belong to this room (any more)
    #[error("session not found in room '{0}'")]
    SessionNotFound(String),
}

/// Why a session's outbound queue stopped yielding events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InboxError {
    /// A delivery found the queue full; the connection must be force-closed
    #[error("outbound queue overflowed")]
    Overflowed,

    /// Every sender was dropped
    #[error("outbound queue closed")]
    Closed,
}
