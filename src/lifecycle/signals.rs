//! OS signal handling.
//!
//! SIGINT and SIGTERM are the only recognized termination triggers; every
//! other signal keeps its OS default behavior.

use std::io;

/// Block until an interrupt or termination signal arrives, returning the
/// signal name for logging.
#[cfg(unix)]
pub async fn wait_for_signal() -> io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = interrupt.recv() => Ok("SIGINT"),
        _ = terminate.recv() => Ok("SIGTERM"),
    }
}

/// Block until Ctrl+C on platforms without unix signals.
#[cfg(not(unix))]
pub async fn wait_for_signal() -> io::Result<&'static str> {
    tokio::signal::ctrl_c().await?;
    Ok("interrupt")
}
