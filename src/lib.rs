//! Server Bootstrap Library
//!
//! # Data Flow
//! ```text
//! built-in defaults → config file → environment variables
//!     → config::loader (discover, merge, decode)
//!     → AppConfig (typed, immutable, owned by the main task)
//!     → http::HttpServer (bind + accept loop on a background task)
//!
//! main task: load config → bind → spawn serve
//!     → block on SIGINT/SIGTERM → trigger shutdown
//!     → drain in-flight connections (30s budget) → exit
//! ```
//!
//! No routes are registered by this core: the axum `Router` handed to
//! [`HttpServer`] is an external collaborator.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::loader::{ConfigError, ConfigLoader, FileFormat};
pub use config::schema::AppConfig;
pub use http::HttpServer;
pub use lifecycle::{Shutdown, ShutdownListener};
