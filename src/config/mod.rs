//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! Defaults (dotted keys, defaults.rs)
//!     → expanded into a JSON value tree
//! config file (YAML/TOML, loader.rs)
//!     → parsed and deep-merged over the defaults (file wins)
//! environment variables (loader.rs)
//!     → overlaid per key (SERVER_BIND_ADDRESS ← server.bind_address)
//!     → decoded into AppConfig (schema.rs)
//! ```
//!
//! # Design Decisions
//! - Config is built once at startup and immutable afterwards; there is no
//!   process-global resolver state
//! - A missing config file is an expected deployment mode, not an error;
//!   any failure reading or decoding a file that exists is fatal
//! - Decode errors always propagate to the caller

pub mod defaults;
pub mod loader;
pub mod schema;

pub use defaults::Defaults;
pub use loader::{ConfigError, ConfigLoader, FileFormat};
pub use schema::{AppConfig, DatabaseConfig, ServerConfig};
