//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use huddle_server::infrastructure::dto::websocket::{DecodeError, ServerMessage};
use huddle_shared::time::get_timestamp;
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{Error as WsError, protocol::Message},
};

use crate::{domain::parse_input, error::ClientError};

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

/// Build the connection URL carrying the room key and participant id
pub fn connect_url(base_url: &str, key: &str, id: u32) -> String {
    format!("{}?key={}&id={}", base_url, key, id)
}

/// Map a failed upgrade to a client error
///
/// 4xx responses mean the parameters were refused and retrying cannot help.
fn classify_connect_error(error: WsError) -> ClientError {
    match error {
        WsError::Http(response) if response.status().is_client_error() => {
            ClientError::HandshakeRejected {
                status: response.status().as_u16(),
            }
        }
        other => ClientError::ConnectionError(other.to_string()),
    }
}

/// Run one WebSocket client session
///
/// Returns `Ok(())` when the user ends input (Ctrl+C / Ctrl+D) and an error
/// when the connection could not be established or was lost.
pub async fn run_client_session(
    url: &str,
    key: &str,
    id: u32,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(connect_url(url, key, id))
        .await
        .map_err(classify_connect_error)?;

    tracing::info!("Connected to chat server!");
    print!("{}", MessageFormatter::format_connected(key, id));
    redisplay_prompt();

    let (mut write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            frame = read.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        display_server_message(text.as_str(), id);
                    }
                    Some(Ok(Message::Binary(data))) => {
                        print!("{}", MessageFormatter::format_binary_message(data.len()));
                        redisplay_prompt();
                    }
                    Some(Ok(Message::Close(frame))) => {
                        match frame {
                            Some(frame) => tracing::warn!(
                                "Server closed the connection (code {}): {}",
                                u16::from(frame.code),
                                frame.reason.as_str()
                            ),
                            None => tracing::info!("Server closed the connection"),
                        }
                        return Err(ClientError::ConnectionError("Connection closed".to_string()));
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!("WebSocket read error: {}", e);
                        return Err(ClientError::ConnectionError(e.to_string()));
                    }
                    None => {
                        return Err(ClientError::ConnectionError("Connection lost".to_string()));
                    }
                }
            }
            line = input_rx.recv() => {
                // Input closed: the user quit
                let Some(line) = line else {
                    let _ = write.send(Message::Close(None)).await;
                    return Ok(());
                };

                let Some(msg) = parse_input(&line) else {
                    continue;
                };

                let json = match msg.encode() {
                    Ok(json) => json,
                    Err(e) => {
                        tracing::error!("Failed to serialize message: {}", e);
                        continue;
                    }
                };

                if let Err(e) = write.send(Message::Text(json.into())).await {
                    tracing::warn!("Failed to send message: {}", e);
                    return Err(ClientError::ConnectionError(e.to_string()));
                }
            }
        }
    }
}

fn display_server_message(text: &str, own_id: u32) {
    let formatted = match ServerMessage::decode(text) {
        Ok(ServerMessage::YourName(name)) => MessageFormatter::format_your_name(name.as_deref()),
        Ok(ServerMessage::NewMessage(message)) => {
            MessageFormatter::format_chat_message(&message, own_id, get_timestamp())
        }
        Err(DecodeError::UnknownType(kind)) => {
            tracing::debug!("Ignoring message of unknown type '{}'", kind);
            return;
        }
        Err(e) => {
            tracing::debug!("Undecodable frame: {}", e);
            MessageFormatter::format_raw_message(text)
        }
    };
    print!("{}", formatted);
    redisplay_prompt();
}
