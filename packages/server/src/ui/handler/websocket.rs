//! WebSocket connection handlers.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{
        Query, State,
        ws::{CloseFrame, Message, Utf8Bytes, WebSocket, WebSocketUpgrade, close_code},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use serde::Deserialize;

use crate::{
    domain::{Inbox, InboxError, ParticipantId, RoomKey, ValueObjectError, outbox_channel},
    infrastructure::dto::websocket::{ClientMessage, DecodeError, ServerMessage},
    ui::{connection::Connection, state::AppState},
    usecase::JoinedSession,
};

/// Query parameters for WebSocket connection
#[derive(Debug, Default, Deserialize)]
pub struct ConnectQuery {
    pub key: Option<String>,
    pub id: Option<String>,
}

/// Validate the handshake parameters
///
/// 欠落しているパラメータは空文字列として検証され、失敗します。
pub fn validate_handshake(
    query: &ConnectQuery,
) -> Result<(RoomKey, ParticipantId), ValueObjectError> {
    let key = query.key.as_deref().unwrap_or_default().parse::<RoomKey>()?;
    let id = query.id.as_deref().unwrap_or_default().parse::<ParticipantId>()?;
    Ok((key, id))
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let mut connection = Connection::new();

    let (key, id) = match validate_handshake(&query) {
        Ok(params) => params,
        Err(e) => {
            tracing::warn!(key = ?query.key, id = ?query.id, "Rejecting handshake: {}", e);
            connection.reject();
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, connection, key, id)))
}

/// How long a force-closed session may take to accept its close frame
const EVICTION_CLOSE_TIMEOUT: Duration = Duration::from_secs(1);

/// Spawns a task that drains the session's inbox and pushes each event to the WebSocket sender.
///
/// On overflow the connection is closed with code 1008 (policy violation). A write that
/// is stuck on a client that stopped reading is abandoned as soon as an overflow happens.
fn pusher_loop(
    mut inbox: Inbox,
    mut sender: SplitSink<WebSocket, Message>,
    session: JoinedSession,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let event = match inbox.recv().await {
                Ok(event) => event,
                Err(InboxError::Overflowed) => {
                    close_for_overflow(&mut sender, &session).await;
                    break;
                }
                Err(InboxError::Closed) => break,
            };

            let json = match ServerMessage::from(event).encode() {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to encode outbound message: {}", e);
                    continue;
                }
            };

            let written = tokio::select! {
                biased;
                _ = inbox.evicted() => {
                    close_for_overflow(&mut sender, &session).await;
                    break;
                }
                result = sender.send(Message::Text(json.into())) => result,
            };
            if let Err(e) = written {
                tracing::debug!(session = %session.handle, "Failed to write frame: {}", e);
                break;
            }
        }
    })
}

/// Best-effort close frame with code 1008 for a session whose queue overflowed
async fn close_for_overflow(sender: &mut SplitSink<WebSocket, Message>, session: &JoinedSession) {
    tracing::warn!(
        room = %session.room.key(),
        user_id = %session.id,
        session = %session.handle,
        "Outbound queue overflowed, closing connection"
    );
    let frame = CloseFrame {
        code: close_code::POLICY,
        reason: Utf8Bytes::from_static("outbound queue overflow"),
    };
    let closed = tokio::time::timeout(
        EVICTION_CLOSE_TIMEOUT,
        sender.send(Message::Close(Some(frame))),
    )
    .await;
    if closed.is_err() {
        tracing::debug!(session = %session.handle, "Close frame not accepted, dropping transport");
    }
}

/// Spawns a task that reads frames from this client and dispatches them one at a time.
fn receiver_loop(
    mut receiver: SplitStream<WebSocket>,
    state: Arc<AppState>,
    session: JoinedSession,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::debug!(session = %session.handle, "WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => dispatch(&state, &session, text.as_str()).await,
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!(
                        room = %session.room.key(),
                        user_id = %session.id,
                        "Client requested close"
                    );
                    break;
                }
                _ => {}
            }
        }
    })
}

/// Decode one inbound text frame and run the matching use case
///
/// 未知の type や不正なフレームは破棄され、接続はそのまま維持されます。
pub(crate) async fn dispatch(state: &AppState, session: &JoinedSession, text: &str) {
    match ClientMessage::decode(text) {
        Ok(ClientMessage::NewMessage(content)) => {
            if let Err(e) = state.send_message_usecase.execute(session, content).await {
                tracing::warn!(session = %session.handle, "Failed to send message: {}", e);
            }
        }
        Ok(ClientMessage::UpdateName(name)) => {
            if let Err(e) = state.update_name_usecase.execute(session, name).await {
                tracing::warn!(session = %session.handle, "Failed to update name: {}", e);
            }
        }
        Err(DecodeError::UnknownType(kind)) => {
            tracing::debug!(
                session = %session.handle,
                "Ignoring message of unknown type '{}'",
                kind
            );
        }
        Err(e) => {
            tracing::debug!(session = %session.handle, "Ignoring frame: {}", e);
        }
    }
}

async fn handle_socket(
    mut socket: WebSocket,
    state: Arc<AppState>,
    mut connection: Connection,
    key: RoomKey,
    id: ParticipantId,
) {
    let (outbox, inbox) = outbox_channel(state.outbound_queue_capacity);

    let session = match state
        .connect_participant_usecase
        .execute(key.clone(), id, outbox)
        .await
    {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(room = %key, user_id = %id, "Failed to join room: {}", e);
            connection.reject();
            let frame = CloseFrame {
                code: close_code::AGAIN,
                reason: Utf8Bytes::from_static("room unavailable"),
            };
            let _ = socket.send(Message::Close(Some(frame))).await;
            return;
        }
    };

    tracing::info!(
        room = %key,
        user_id = %id,
        session = %session.handle,
        "Participant connected"
    );
    connection.join(session.clone());

    let (sender, receiver) = socket.split();
    let mut send_task = pusher_loop(inbox, sender, session.clone());
    let mut recv_task = receiver_loop(receiver, state.clone(), session);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    if let Some(session) = connection.begin_closing() {
        state.disconnect_participant_usecase.execute(&session).await;
    }
    connection.close();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ChatMessage, OutboundEvent},
        infrastructure::repository::InMemoryRoomRegistry,
    };

    fn query(key: Option<&str>, id: Option<&str>) -> ConnectQuery {
        ConnectQuery {
            key: key.map(str::to_string),
            id: id.map(str::to_string),
        }
    }

    #[test]
    fn test_validate_handshake_accepts_valid_params() {
        // テスト項目: 正しいキーと ID は受け付けられる
        // given (前提条件):
        let q = query(Some("abcde"), Some("4294967295"));

        // when (操作):
        let result = validate_handshake(&q);

        // then (期待する結果):
        let (key, id) = result.unwrap();
        assert_eq!(key.as_str(), "abcde");
        assert_eq!(id.value(), u32::MAX);
    }

    #[test]
    fn test_validate_handshake_rejects_bad_params() {
        // テスト項目: 不正・欠落したパラメータは拒否される
        // given (前提条件):
        let cases = [
            query(Some("ABCDE"), Some("42")),
            query(Some("abcd"), Some("42")),
            query(Some("abcde"), Some("4294967296")),
            query(Some("abcde"), Some("-1")),
            query(Some("abcde"), Some("+42")),
            query(None, Some("42")),
            query(Some("abcde"), None),
        ];

        for q in cases {
            // when (操作):
            let result = validate_handshake(&q);

            // then (期待する結果):
            assert!(result.is_err(), "expected rejection for {:?}", q);
        }
    }

    async fn joined(state: &AppState, id: u32) -> (JoinedSession, Inbox) {
        let (outbox, mut inbox) = outbox_channel(8);
        let session = state
            .connect_participant_usecase
            .execute("abcde".parse().unwrap(), ParticipantId::new(id), outbox)
            .await
            .unwrap();
        assert_eq!(inbox.recv().await, Ok(OutboundEvent::YourName(None)));
        (session, inbox)
    }

    #[tokio::test]
    async fn test_dispatch_new_message_and_update_name() {
        // テスト項目: update_name の後の new_message は新しい名前で配信される
        // given (前提条件):
        let state = AppState::from_registry(InMemoryRoomRegistry::new(), 8);
        let (session, mut inbox) = joined(&state, 42).await;

        // when (操作):
        dispatch(&state, &session, r#"{"type":"update_name","value":"Bob"}"#).await;
        dispatch(&state, &session, r#"{"type":"new_message","value":"hi"}"#).await;

        // then (期待する結果):
        assert_eq!(
            inbox.recv().await,
            Ok(OutboundEvent::NewMessage(ChatMessage::new(
                ParticipantId::new(42),
                Some("Bob".to_string()),
                "hi".to_string(),
            )))
        );
    }

    #[tokio::test]
    async fn test_dispatch_ignores_unknown_and_malformed_frames() {
        // テスト項目: 未知の type や不正なフレームは何も配信しない
        // given (前提条件):
        let state = AppState::from_registry(InMemoryRoomRegistry::new(), 8);
        let (session, inbox) = joined(&state, 42).await;

        // when (操作):
        dispatch(&state, &session, r#"{"type":"typing","value":true}"#).await;
        dispatch(&state, &session, r#"{"type":"new_message","value":7}"#).await;
        dispatch(&state, &session, "not json").await;

        // then (期待する結果):
        assert_eq!(inbox.pending(), 0);
        assert_eq!(session.room.participant_count().await, 1);
    }
}
