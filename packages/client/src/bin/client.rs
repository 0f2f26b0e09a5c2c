//! Terminal chat client for Huddle rooms.
//!
//! Joins a room with a room key and a numeric participant id, prints every
//! broadcast in the room and sends each input line as a message.
//! `/name <name>` changes the display name used for later messages.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//! A rejected handshake (bad key or id) exits immediately.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin huddle-client -- --key abcde --id 42
//! cargo run --bin huddle-client -- -k abcde -i 7 -u ws://127.0.0.1:3000/ws
//! ```

use clap::Parser;

use huddle_server::domain::RoomKey;
use huddle_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "huddle-client")]
#[command(about = "Terminal client for Huddle room broadcast chat", long_about = None)]
struct Args {
    /// Room key (5 lowercase letters)
    #[arg(short = 'k', long)]
    key: RoomKey,

    /// Participant id (0..=4294967295)
    #[arg(short = 'i', long)]
    id: u32,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = huddle_client::run_client(args.url, args.key.into_string(), args.id).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
