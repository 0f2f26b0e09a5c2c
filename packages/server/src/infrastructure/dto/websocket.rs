//! WebSocket message codec
//!
//! 全てのフレームは `{ "type": <string>, "value": <payload> }` 形式の JSON です。
//!
//! | 方向 | type | value |
//! |------|------|-------|
//! | server → client | `your_name` | 表示名 (string) または null |
//! | server → client | `new_message` | `{ user_id, user_name, content }` |
//! | client → server | `new_message` | 本文 (string) |
//! | client → server | `update_name` | 新しい表示名 (string) |
//!
//! 受信側は未知の `type` を無視します。

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payload of a server → client `new_message`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageDto {
    pub user_id: u32,
    pub user_name: Option<String>,
    pub content: String,
}

/// Server → client messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ServerMessage {
    YourName(Option<String>),
    NewMessage(ChatMessageDto),
}

/// Client → server messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ClientMessage {
    NewMessage(String),
    UpdateName(String),
}

/// Why a frame could not be turned into a known message
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Not JSON, not an envelope, or a payload of the wrong shape
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Well-formed envelope carrying a type this side does not know
    #[error("unrecognized message type '{0}'")]
    UnknownType(String),
}

/// The untyped envelope, decoded first so that unknown types can be told
/// apart from malformed payloads.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    value: serde_json::Value,
}

impl ClientMessage {
    pub const NEW_MESSAGE: &'static str = "new_message";
    pub const UPDATE_NAME: &'static str = "update_name";

    /// Decode one text frame received from a client
    pub fn decode(text: &str) -> Result<Self, DecodeError> {
        let Envelope { kind, value } = serde_json::from_str(text)?;
        match kind.as_str() {
            Self::NEW_MESSAGE => Ok(Self::NewMessage(serde_json::from_value(value)?)),
            Self::UPDATE_NAME => Ok(Self::UpdateName(serde_json::from_value(value)?)),
            _ => Err(DecodeError::UnknownType(kind)),
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl ServerMessage {
    pub const YOUR_NAME: &'static str = "your_name";
    pub const NEW_MESSAGE: &'static str = "new_message";

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode one text frame received from the server
    pub fn decode(text: &str) -> Result<Self, DecodeError> {
        let Envelope { kind, value } = serde_json::from_str(text)?;
        match kind.as_str() {
            Self::YOUR_NAME => Ok(Self::YourName(serde_json::from_value(value)?)),
            Self::NEW_MESSAGE => Ok(Self::NewMessage(serde_json::from_value(value)?)),
            _ => Err(DecodeError::UnknownType(kind)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_your_name_null() {
        // テスト項目: 名前未設定の your_name は value が null になる
        // given (前提条件):
        let msg = ServerMessage::YourName(None);

        // when (操作):
        let encoded = msg.encode().unwrap();

        // then (期待する結果):
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value, json!({"type": "your_name", "value": null}));
    }

    #[test]
    fn test_encode_new_message() {
        // テスト項目: new_message は user_id / user_name / content を持つ
        // given (前提条件):
        let msg = ServerMessage::NewMessage(ChatMessageDto {
            user_id: 42,
            user_name: Some("Bob".to_string()),
            content: "hi".to_string(),
        });

        // when (操作):
        let encoded = msg.encode().unwrap();

        // then (期待する結果):
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "new_message",
                "value": {"user_id": 42, "user_name": "Bob", "content": "hi"}
            })
        );
    }

    #[test]
    fn test_decode_client_messages() {
        // テスト項目: new_message / update_name が正しくデコードされる
        // given (前提条件):
        let new_message = r#"{"type":"new_message","value":"hello"}"#;
        let update_name = r#"{"type":"update_name","value":"Bob"}"#;

        // when (操作):
        let decoded_message = ClientMessage::decode(new_message).unwrap();
        let decoded_name = ClientMessage::decode(update_name).unwrap();

        // then (期待する結果):
        assert_eq!(decoded_message, ClientMessage::NewMessage("hello".to_string()));
        assert_eq!(decoded_name, ClientMessage::UpdateName("Bob".to_string()));
    }

    #[test]
    fn test_decode_unknown_type() {
        // テスト項目: 未知の type は UnknownType になる
        // given (前提条件):
        let text = r#"{"type":"dance","value":{"moves":3}}"#;

        // when (操作):
        let result = ClientMessage::decode(text);

        // then (期待する結果):
        assert!(matches!(result, Err(DecodeError::UnknownType(kind)) if kind == "dance"));
    }

    #[test]
    fn test_decode_malformed_frames() {
        // テスト項目: 不正な JSON・型の合わない payload は Malformed になる
        // given (前提条件):
        let candidates = [
            "hello",
            "{}",
            r#"{"value":"no type"}"#,
            r#"{"type":42,"value":"x"}"#,
            r#"{"type":"new_message","value":7}"#,
            r#"{"type":"new_message"}"#,
            r#"{"type":"update_name","value":null}"#,
        ];

        for text in candidates {
            // when (操作):
            let result = ClientMessage::decode(text);

            // then (期待する結果):
            assert!(
                matches!(result, Err(DecodeError::Malformed(_))),
                "'{}' should be malformed",
                text
            );
        }
    }

    #[test]
    fn test_client_encode_matches_decode() {
        // テスト項目: クライアントがエンコードしたメッセージをサーバーがデコードできる
        // given (前提条件):
        let msg = ClientMessage::UpdateName(String::new());

        // when (操作):
        let decoded = ClientMessage::decode(&msg.encode().unwrap()).unwrap();

        // then (期待する結果):
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_server_decode_your_name_with_value() {
        // テスト項目: クライアント側で your_name をデコードできる
        // given (前提条件):
        let text = r#"{"type":"your_name","value":"Bob"}"#;

        // when (操作):
        let decoded = ServerMessage::decode(text).unwrap();

        // then (期待する結果):
        assert_eq!(decoded, ServerMessage::YourName(Some("Bob".to_string())));
    }
}
