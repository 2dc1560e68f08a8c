//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_server;

use scorekeeper::client::{FileStore, HttpRemote, ScoreClient};
use scorekeeper::config::{ClientConfig, Config, InvalidPayloadPolicy};
use scorekeeper::score::ScoreStore;
use scorekeeper::server::{ScoreServer, ServerHandle};
use std::net::{SocketAddr, TcpListener};
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Base URL nothing is listening on.
pub fn dead_base_url() -> String {
    format!("http://127.0.0.1:{}", free_port())
}

/// Wait for a server to become available.
pub async fn wait_for_server(addr: SocketAddr, timeout: Duration) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

/// A running score server on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub store: ScoreStore,
    pub handle: ServerHandle,
    pub task: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn start(policy: InvalidPayloadPolicy) -> Self {
        let mut config = Config::default();
        config.server.bind_addr = "127.0.0.1:0".to_string();
        config.server.invalid_payload = policy;

        let mut server = ScoreServer::new(&config);
        let addr = server.try_bind().await.expect("Failed to bind");
        let store = server.store();
        let handle = server.handle();

        let task = tokio::spawn(async move {
            let _ = server.run().await;
        });

        assert!(wait_for_server(addr, Duration::from_secs(2)).await);
        Self {
            addr,
            store,
            handle,
            task,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn url(&self) -> String {
        format!("http://{}/api/v1/score", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.shutdown();
    }
}

/// Client config with short timeouts pointing at `base_url`.
pub fn client_config(base_url: &str, fallback: &Path) -> ClientConfig {
    ClientConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 2,
        connect_timeout_seconds: 1,
        fallback_path: Some(fallback.to_path_buf()),
    }
}

/// HTTP client backed by a file store inside `dir`.
pub fn file_client(base_url: &str, dir: &TempDir) -> ScoreClient<HttpRemote, FileStore> {
    let config = client_config(base_url, &dir.path().join("fallback.json"));
    let remote = HttpRemote::new(&config).expect("Failed to build remote");
    ScoreClient::new(remote, FileStore::new(config.fallback_path()))
}
