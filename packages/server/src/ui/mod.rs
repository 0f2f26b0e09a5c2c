//! UI layer: HTTP / WebSocket endpoints.

mod connection;
mod handler;
mod server;
mod signal;
mod state;

pub use connection::{Connection, ConnectionPhase};
pub use handler::websocket::{ConnectQuery, validate_handshake};
pub use server::Server;
pub use state::AppState;
