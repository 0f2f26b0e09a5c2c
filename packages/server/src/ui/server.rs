//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{config::ServerConfig, domain::RoomRegistry};

use super::{
    handler::{get_room_detail, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket room broadcast server
///
/// # Example
///
/// ```ignore
/// let registry = InMemoryRoomRegistry::new();
/// let server = Server::from_registry(registry, ServerConfig::default());
/// server.run().await?;
/// ```
pub struct Server {
    app_state: Arc<AppState>,
    config: ServerConfig,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `app_state` - Use cases shared by every handler
    /// * `config` - Bind address and per-connection limits
    pub fn new(app_state: AppState, config: ServerConfig) -> Self {
        Self {
            app_state: Arc::new(app_state),
            config,
        }
    }

    /// Create a Server whose use cases all share `registry`
    pub fn from_registry(registry: Arc<dyn RoomRegistry>, config: ServerConfig) -> Self {
        let app_state = AppState::from_registry(registry, config.outbound_queue_capacity);
        Self::new(app_state, config)
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router with every endpoint
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{key}", get(get_room_detail))
            .layer(TraceLayer::new_for_http())
            .with_state(self.app_state.clone())
    }

    /// Bind to the configured address and serve until Ctrl+C / SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address or
    /// if there's an error during server execution.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let bind_addr = self.config.bind_addr();
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "WebSocket chat server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws?key=<room>&id=<user>", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve_with_shutdown(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `signal` resolves
    pub async fn serve_with_shutdown<F>(
        self,
        listener: TcpListener,
        signal: F,
    ) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(signal)
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
