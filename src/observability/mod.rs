//! Observability subsystem.
//!
//! Structured logging only: no metrics endpoint and no distributed tracing
//! pipeline. Startup diagnostics (rendered sub-configurations) go through
//! the same subscriber at debug level.

pub mod logging;
