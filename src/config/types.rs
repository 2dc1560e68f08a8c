use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

/// Settings for the score API server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the API server (host:port).
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// What to do with a POST whose `score` is not a number.
    #[serde(default)]
    pub invalid_payload: InvalidPayloadPolicy,
}

/// Handling of a well-formed JSON body with an unusable `score`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidPayloadPolicy {
    /// Leave the state unchanged and answer 200 with the current values.
    #[default]
    Ignore,
    /// Answer 400 with an `invalid_payload` error.
    Reject,
}

impl InvalidPayloadPolicy {
    /// Parse policy from string. Unknown values yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ignore" => Some(Self::Ignore),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

/// Settings for the score client and its local fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Server base URL (scheme + host + port).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Total request timeout in seconds (default: 10).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 3).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// Fallback store file. Defaults to the platform data directory.
    #[serde(default)]
    pub fallback_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Resolved location of the local fallback file.
    ///
    /// Uses `~/.local/share/scorekeeper/fallback.json` on Linux, or the
    /// equivalent via `dirs::data_dir()`.
    pub fn fallback_path(&self) -> PathBuf {
        self.fallback_path.clone().unwrap_or_else(|| {
            let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
            data_dir.join("scorekeeper").join("fallback.json")
        })
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1:3001".to_string()
}

fn default_base_url() -> String {
    "http://127.0.0.1:3001".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_connect_timeout() -> u32 {
    3
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            invalid_payload: InvalidPayloadPolicy::default(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            fallback_path: None,
        }
    }
}
