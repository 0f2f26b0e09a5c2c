//! Data Transfer Objects
//!
//! - `websocket`: WebSocket で送受信するメッセージ（Message Codec）
//! - `http`: HTTP API のレスポンス
//! - `conversion`: ドメインモデルと DTO の変換

pub mod conversion;
pub mod http;
pub mod websocket;
