//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → stream.rs (idle-deadline enforcement on the socket)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - The idle bound is enforced at the socket level: any read or write
//!   progress resets the deadline, so only truly quiet connections are
//!   reaped
//! - A disabled bound is a pure pass-through, not a very long timer

pub mod stream;

pub use stream::IdleTimeout;
