//! UseCase errors.

use thiserror::Error;

use crate::domain::RoomError;

/// 参加者接続のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// Every room handed out for the key was retired before the join landed
    #[error("room '{key}' was reclaimed {attempts} times while joining")]
    RoomUnavailable { key: String, attempts: usize },

    #[error(transparent)]
    Room(#[from] RoomError),
}

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error(transparent)]
    Room(#[from] RoomError),
}

/// 表示名更新のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateNameError {
    #[error(transparent)]
    Room(#[from] RoomError),
}

/// ルーム詳細取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("room '{0}' not found")]
    RoomNotFound(String),
}
