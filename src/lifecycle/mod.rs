//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Bind listener → Spawn accept loop
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain connections → Exit
//!
//! Signals (signals.rs):
//!     SIGINT/SIGTERM → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - The listener is bound before the accept loop is spawned, so a bind
//!   failure is reported from the main task
//! - Shutdown is one-shot and terminal for the process; there is no
//!   transition back to running
//! - Drain has a fixed deadline: remaining connections are abandoned once
//!   the budget is spent

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownListener};
