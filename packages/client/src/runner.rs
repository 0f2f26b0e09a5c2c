//! Client execution logic with reconnection support.

use std::time::Duration;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use super::{
    domain::{should_attempt_reconnect, should_exit_immediately},
    error::ClientError,
    session::run_client_session,
    ui::PROMPT,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Spawn a blocking thread for rustyline (synchronous readline)
///
/// The thread outlives individual sessions so that reconnecting keeps one editor.
fn spawn_readline() -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}

/// Run the WebSocket client with reconnection logic
pub async fn run_client(url: String, key: String, id: u32) -> Result<(), ClientError> {
    let mut input_rx = spawn_readline();
    let mut failed_attempts = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} room '{}' as #{} (attempt {}/{})",
            url,
            key,
            id,
            failed_attempts + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        let error = match run_client_session(&url, &key, id, &mut input_rx).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) => e,
        };

        if should_exit_immediately(&error) {
            tracing::error!("{}", error);
            return Err(error);
        }

        tracing::warn!("Connection lost: {}", error);
        failed_attempts += 1;

        if !should_attempt_reconnect(&error, failed_attempts, MAX_RECONNECT_ATTEMPTS) {
            tracing::error!(
                "Failed to reconnect after {} attempts. Exiting.",
                MAX_RECONNECT_ATTEMPTS
            );
            return Err(ClientError::ReconnectExhausted(MAX_RECONNECT_ATTEMPTS));
        }

        tracing::info!(
            "Reconnecting in {} seconds... (attempt {}/{})",
            RECONNECT_INTERVAL_SECS,
            failed_attempts + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
    }
}
