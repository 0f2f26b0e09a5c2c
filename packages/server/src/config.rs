//! Server configuration.

use clap::Parser;

/// Default capacity of each session's outbound queue
pub const DEFAULT_OUTBOUND_QUEUE_CAPACITY: usize = 64;

/// Command line arguments of `huddle-server`
#[derive(Parser, Debug, Clone)]
#[command(name = "huddle-server")]
#[command(about = "WebSocket room broadcast chat server", long_about = None)]
pub struct ServerArgs {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HUDDLE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "HUDDLE_PORT", default_value = "8080")]
    pub port: u16,

    /// Events buffered per connection before a slow client is disconnected
    #[arg(
        long,
        env = "HUDDLE_OUTBOUND_QUEUE_CAPACITY",
        default_value_t = DEFAULT_OUTBOUND_QUEUE_CAPACITY,
        value_parser = parse_queue_capacity
    )]
    pub outbound_queue_capacity: usize,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "debug")]
    pub log_level: String,
}

fn parse_queue_capacity(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("capacity must be at least 1".to_string()),
        Ok(capacity) => Ok(capacity),
        Err(e) => Err(e.to_string()),
    }
}

/// Runtime configuration handed to the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub outbound_queue_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            outbound_queue_capacity: DEFAULT_OUTBOUND_QUEUE_CAPACITY,
        }
    }
}

impl From<ServerArgs> for ServerConfig {
    fn from(args: ServerArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            outbound_queue_capacity: args.outbound_queue_capacity,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
