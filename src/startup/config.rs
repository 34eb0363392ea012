//! Server connection configuration.
//!
//! The endpoint and reconnect parameters come from environment variables
//! and can be overridden from the command line.

use std::time::Duration;
use tracing::warn;

pub const ENV_SERVER_URL: &str = "SOCKVIEW_SERVER_URL";
pub const ENV_SERVER_PORT: &str = "SOCKVIEW_SERVER_PORT";
pub const ENV_SOCKET_PATH: &str = "SOCKVIEW_SOCKET_PATH";
pub const ENV_RECONNECT_DELAY_MS: &str = "SOCKVIEW_RECONNECT_DELAY_MS";
pub const ENV_RECONNECT_ATTEMPTS: &str = "SOCKVIEW_RECONNECT_ATTEMPTS";
pub const ENV_TIMEOUT_MS: &str = "SOCKVIEW_TIMEOUT_MS";

const DEFAULT_URL: &str = "http://localhost:5000";
const DEFAULT_PATH: &str = "/socket.io/";

/// Configuration for the Socket.IO connection.
///
/// ```
/// use sockview::startup::ServerConfig;
/// use std::time::Duration;
///
/// let config = ServerConfig::default()
///     .with_url("https://example.com")
///     .with_path("/py_react_socketio_example/socket.io/")
///     .with_reconnect_delay(Duration::from_millis(500));
/// assert_eq!(
///     config.endpoint_url(),
///     "wss://example.com/py_react_socketio_example/socket.io/?EIO=4&transport=websocket"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Base URL of the server (`http`, `https`, `ws` or `wss`)
    pub url: String,
    /// Socket.IO mount path
    pub path: String,
    /// Fixed delay between reconnection attempts
    pub reconnect_delay: Duration,
    /// Reconnection attempts before giving up (0 disables reconnection)
    pub reconnect_attempts: u32,
    /// Budget for TCP connect, WebSocket upgrade and Socket.IO handshake
    pub handshake_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            path: DEFAULT_PATH.to_string(),
            reconnect_delay: Duration::from_millis(1000),
            reconnect_attempts: 5,
            handshake_timeout: Duration::from_millis(20000),
        }
    }
}

impl ServerConfig {
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Append `:port` to the URL unless it already names one.
    pub fn with_port(mut self, port: u16) -> Self {
        if !has_explicit_port(&self.url) {
            let trimmed = self.url.trim_end_matches('/');
            self.url = format!("{}:{}", trimmed, port);
        }
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    pub fn with_reconnect_attempts(mut self, attempts: u32) -> Self {
        self.reconnect_attempts = attempts;
        self
    }

    pub fn with_handshake_timeout(mut self, timeout: Duration) -> Self {
        self.handshake_timeout = timeout;
        self
    }

    /// Build the config from `SOCKVIEW_*` environment variables.
    ///
    /// Unset variables keep their defaults. Values that fail to parse are
    /// logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_SERVER_URL).filter(|v| !v.trim().is_empty()) {
            config = config.with_url(url.trim());
        }
        if let Some(port) = parse_var::<u16>(&lookup, ENV_SERVER_PORT) {
            config = config.with_port(port);
        }
        if let Some(path) = lookup(ENV_SOCKET_PATH).filter(|v| !v.trim().is_empty()) {
            config = config.with_path(path.trim());
        }
        if let Some(ms) = parse_var::<u64>(&lookup, ENV_RECONNECT_DELAY_MS) {
            config = config.with_reconnect_delay(Duration::from_millis(ms));
        }
        if let Some(attempts) = parse_var::<u32>(&lookup, ENV_RECONNECT_ATTEMPTS) {
            config = config.with_reconnect_attempts(attempts);
        }
        if let Some(ms) = parse_var::<u64>(&lookup, ENV_TIMEOUT_MS) {
            config = config.with_handshake_timeout(Duration::from_millis(ms));
        }

        config
    }

    /// WebSocket URL for the Engine.IO endpoint.
    pub fn endpoint_url(&self) -> String {
        let base = self.url.trim().trim_end_matches('/');
        let base = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else if base.starts_with("ws://") || base.starts_with("wss://") {
            base.to_string()
        } else {
            format!("ws://{}", base)
        };

        format!(
            "{}{}?EIO=4&transport=websocket",
            base,
            normalize_path(&self.path)
        )
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid number", key, raw);
            None
        }
    }
}

/// Ensure the path has a leading and trailing slash.
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        return DEFAULT_PATH.to_string();
    }
    format!("/{}/", trimmed)
}

fn has_explicit_port(url: &str) -> bool {
    let without_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let authority = without_scheme.split('/').next().unwrap_or("");
    let host_port = authority.rsplit(']').next().unwrap_or(authority);
    match host_port.rsplit_once(':') {
        Some((_, port)) => !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}
