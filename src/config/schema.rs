//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files and
//! carry defaults so a minimal (or absent) config file is valid.

use std::net::SocketAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Built-in request-read bound, applied when the field is absent.
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 5;

/// Built-in response-write bound, applied when the field is absent.
pub const DEFAULT_WRITE_TIMEOUT_SECS: u64 = 10;

/// Built-in keep-alive idle bound, applied when the field is absent.
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 120;

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Service identifier, attached to startup log events.
    #[serde(alias = "API_NAME", alias = "Name")]
    pub api_name: String,

    /// HTTP server settings.
    pub server: ServerConfig,

    /// Database settings. Not consumed by any running logic; present to
    /// exercise layering of a nested group.
    pub database: DatabaseConfig,
}

/// HTTP server configuration.
///
/// Timeout fields are tri-state: absent means "apply the built-in default",
/// an explicit `0` means "no bound", and `n` means n seconds. This keeps
/// "not configured" distinct from "explicitly disabled" so an uninitialized
/// field never silently turns a protection off.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address, either `host:port` or `:port`.
    pub bind_address: String,

    /// Max time to read a request from the client, in seconds.
    pub read_timeout_secs: Option<u64>,

    /// Max time to produce and write a response, in seconds.
    pub write_timeout_secs: Option<u64>,

    /// Max time a keep-alive connection may sit idle, in seconds.
    pub idle_timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:9090".to_string(),
            read_timeout_secs: None,
            write_timeout_secs: None,
            idle_timeout_secs: None,
        }
    }
}

impl ServerConfig {
    /// Effective request-read bound. `None` only when explicitly disabled.
    pub fn read_timeout(&self) -> Option<Duration> {
        resolve_timeout(self.read_timeout_secs, DEFAULT_READ_TIMEOUT_SECS)
    }

    /// Effective response-write bound. `None` only when explicitly disabled.
    pub fn write_timeout(&self) -> Option<Duration> {
        resolve_timeout(self.write_timeout_secs, DEFAULT_WRITE_TIMEOUT_SECS)
    }

    /// Effective keep-alive idle bound. `None` only when explicitly disabled.
    pub fn idle_timeout(&self) -> Option<Duration> {
        resolve_timeout(self.idle_timeout_secs, DEFAULT_IDLE_TIMEOUT_SECS)
    }

    /// Parse the bind address, accepting the `:port` shorthand for
    /// "all interfaces".
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        if let Some(port) = self.bind_address.strip_prefix(':') {
            format!("0.0.0.0:{port}").parse()
        } else {
            self.bind_address.parse()
        }
    }

    /// Render as indented text for startup diagnostics. Not a stable format.
    pub fn render(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn resolve_timeout(configured: Option<u64>, default_secs: u64) -> Option<Duration> {
    match configured {
        None => Some(Duration::from_secs(default_secs)),
        Some(0) => None,
        Some(secs) => Some(Duration::from_secs(secs)),
    }
}

/// Database configuration. Placeholder group, fields default to empty.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    pub name: String,
    pub user: String,
    pub password: String,
}

impl DatabaseConfig {
    /// Render as indented text for startup diagnostics. Not a stable format.
    pub fn render(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
