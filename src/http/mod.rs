//! HTTP server subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (accept loop in server.rs)
//!     → net::IdleTimeout (keep-alive idle bound)
//!     → hyper auto builder (HTTP/1.1 + HTTP/2, request-read bound)
//!     → axum Router supplied by the caller (response-write bound)
//! ```
//!
//! No routes are registered here; the router is an external collaborator.

pub mod server;

pub use server::{HttpServer, ServerError};
