//! HTTP server setup and lifecycle.
//!
//! # Responsibilities
//! - Bind the listener to the configured address
//! - Apply the configured read/write/idle bounds
//! - Accept connections until a shutdown signal arrives
//! - Drain in-flight connections within the shutdown budget
//!
//! # Timeout mapping
//! - read timeout → hyper's header-read timer (covers the wait for the next
//!   request head on keep-alive connections too)
//! - write timeout → `TimeoutLayer` over the router (bounds producing the
//!   response)
//! - idle timeout → [`IdleTimeout`] socket wrapper
//!
//! A bound explicitly disabled in the configuration is simply not applied.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use hyper_util::rt::{TokioExecutor, TokioIo, TokioTimer};
use hyper_util::server::conn::auto;
use hyper_util::server::graceful::GracefulShutdown;
use hyper_util::service::TowerToHyperService;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::lifecycle::ShutdownListener;
use crate::net::IdleTimeout;

/// How long in-flight requests get to finish after a shutdown signal.
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Error type for server construction and operation.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured bind address does not parse.
    #[error("invalid bind address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// Failed to bind the listener.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// I/O error during server operation.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The bootstrap HTTP server.
///
/// Owns the server-side configuration and the request-dispatch router.
/// Shutdown is one-shot: once the signal receiver fires the server drains
/// and returns, it never resumes accepting.
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
    shutdown_timeout: Duration,
}

impl HttpServer {
    /// Create a server from resolved configuration and a caller-supplied
    /// router.
    pub fn new(config: ServerConfig, router: Router) -> Self {
        Self {
            config,
            router,
            shutdown_timeout: SHUTDOWN_TIMEOUT,
        }
    }

    /// Override the drain budget. Used by tests to keep shutdown fast.
    #[must_use]
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Get a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Bind a listener to the configured address.
    ///
    /// Any failure here is fatal to the caller; there is no retry.
    pub async fn bind(&self) -> Result<TcpListener, ServerError> {
        let addr = self
            .config
            .socket_addr()
            .map_err(|source| ServerError::InvalidAddress {
                addr: self.config.bind_address.clone(),
                source,
            })?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        tracing::info!(address = %listener.local_addr()?, "Listener bound");
        Ok(listener)
    }

    /// Accept and serve connections until `shutdown` fires, then drain
    /// in-flight connections within the shutdown budget.
    pub async fn serve(
        self,
        listener: TcpListener,
        mut shutdown: ShutdownListener,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            read_timeout = ?self.config.read_timeout(),
            write_timeout = ?self.config.write_timeout(),
            idle_timeout = ?self.config.idle_timeout(),
            "HTTP server starting"
        );

        let mut app = self.router;
        if let Some(timeout) = self.config.write_timeout() {
            #[allow(deprecated)]
            {
                app = app.layer(TimeoutLayer::new(timeout));
            }
        }
        let app = app.layer(TraceLayer::new_for_http());
        let service = TowerToHyperService::new(app);

        let mut builder = auto::Builder::new(TokioExecutor::new());
        {
            let mut http1 = builder.http1();
            http1.timer(TokioTimer::new());
            if let Some(timeout) = self.config.read_timeout() {
                http1.header_read_timeout(timeout);
            }
        }
        builder.http2().timer(TokioTimer::new());

        let graceful = GracefulShutdown::new();
        let idle_timeout = self.config.idle_timeout();

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    match accepted {
                        Ok((stream, peer_addr)) => {
                            tracing::debug!(peer_addr = %peer_addr, "Connection accepted");

                            let io = TokioIo::new(IdleTimeout::new(stream, idle_timeout));
                            let conn = builder.serve_connection_with_upgrades(io, service.clone());
                            let conn = graceful.watch(conn.into_owned());

                            tokio::spawn(async move {
                                if let Err(err) = conn.await {
                                    tracing::debug!(
                                        peer_addr = %peer_addr,
                                        error = %err,
                                        "Connection closed with error"
                                    );
                                }
                            });
                        }
                        Err(err) => {
                            tracing::error!(error = %err, "Failed to accept connection");
                        }
                    }
                }
                _ = shutdown.wait() => {
                    tracing::info!("Shutdown requested, no longer accepting connections");
                    break;
                }
            }
        }

        // Stop accepting before draining.
        drop(listener);

        tokio::select! {
            _ = graceful.shutdown() => {
                tracing::info!("All connections drained");
            }
            _ = tokio::time::sleep(self.shutdown_timeout) => {
                tracing::warn!(
                    timeout = ?self.shutdown_timeout,
                    "Shutdown deadline exceeded, aborting remaining connections"
                );
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
