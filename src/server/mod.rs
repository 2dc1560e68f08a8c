pub mod error;
pub mod health;
pub mod router;
pub mod shutdown;

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, InvalidPayloadPolicy};
use crate::score::ScoreStore;
use crate::server::router::{build_router, AppState};
use crate::server::shutdown::ShutdownManager;

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();
}

pub struct ScoreServer {
    pub addr: SocketAddr,
    /// Populated by try_bind(), consumed by run().
    listener: Option<TcpListener>,
    bind_addr: String,
    store: ScoreStore,
    invalid_payload: InvalidPayloadPolicy,
    shutdown: Arc<ShutdownManager>,
}

impl ScoreServer {
    /// Create a server with a fresh, zeroed score store.
    pub fn new(config: &Config) -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)), // Will be determined at bind time
            listener: None,
            bind_addr: config.server.bind_addr.clone(),
            store: ScoreStore::new(),
            invalid_payload: config.server.invalid_payload,
            shutdown: Arc::new(ShutdownManager::new()),
        }
    }

    /// Bind to the configured address.
    ///
    /// The listener is kept alive so the port cannot be claimed by another
    /// process between try_bind() and run().
    pub async fn try_bind(&mut self) -> Result<SocketAddr, Box<dyn std::error::Error>> {
        let bind_addr: SocketAddr = self
            .bind_addr
            .parse()
            .map_err(|e| format!("Invalid bind address '{}': {}", self.bind_addr, e))?;

        let listener = TcpListener::bind(bind_addr).await?;
        let actual_addr = listener.local_addr()?;

        self.addr = actual_addr;
        self.listener = Some(listener);
        tracing::info!("Score server bound to {}", actual_addr);
        Ok(actual_addr)
    }

    /// Handle to the score state served by this instance.
    pub fn store(&self) -> ScoreStore {
        self.store.clone()
    }

    pub fn handle(&self) -> ServerHandle {
        ServerHandle {
            shutdown: self.shutdown.clone(),
        }
    }

    /// Run the server until shutdown is signalled.
    ///
    /// Call try_bind() before run() to bind the listener.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let listener = self
            .listener
            .ok_or("try_bind() must be called before run()")?;

        tracing::info!("Server running at http://{}", self.addr);

        let app = build_router(AppState::new(self.store, self.invalid_payload));

        let shutdown = self.shutdown.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.wait_for_shutdown().await })
            .into_future()
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

#[derive(Clone)]
pub struct ServerHandle {
    shutdown: Arc<ShutdownManager>,
}

impl ServerHandle {
    pub fn shutdown(&self) {
        self.shutdown.signal_shutdown();
    }
}
