//! Infrastructure layer
//!
//! - `repository`: ドメイン層の `RoomRegistry` trait の実装
//! - `dto`: WebSocket / HTTP で送受信するデータ形式と変換

pub mod dto;
pub mod repository;
