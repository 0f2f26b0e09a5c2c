//! Room broadcast chat server.
//!
//! Participants connect to `/ws?key=<room>&id=<user>` and every message they send
//! is broadcast to all participants of the same room, the sender included.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin huddle-server
//! cargo run --bin huddle-server -- --host 0.0.0.0 --port 3000
//! ```

use clap::Parser;
use huddle_server::{
    config::{ServerArgs, ServerConfig},
    infrastructure::repository::InMemoryRoomRegistry,
    ui::Server,
};
use huddle_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = ServerArgs::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let config = ServerConfig::from(args);
    tracing::info!(
        outbound_queue_capacity = config.outbound_queue_capacity,
        "Starting server"
    );

    // Registry → UseCases → Server
    let registry = InMemoryRoomRegistry::new();
    let server = Server::from_registry(registry, config);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
