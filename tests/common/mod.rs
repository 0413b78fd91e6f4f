//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use service_bootstrap::config::ServerConfig;
use service_bootstrap::{HttpServer, Shutdown};

/// Server config bound to an ephemeral port with fast built-in defaults.
#[allow(dead_code)]
pub fn local_config() -> ServerConfig {
    ServerConfig {
        bind_address: "127.0.0.1:0".to_string(),
        ..ServerConfig::default()
    }
}

/// Bind and spawn a server, returning its address, the shutdown handle, and
/// the serve task.
#[allow(dead_code)]
pub async fn start_server(
    config: ServerConfig,
    router: Router,
    shutdown_timeout: Duration,
) -> (
    SocketAddr,
    Shutdown,
    tokio::task::JoinHandle<Result<(), service_bootstrap::http::ServerError>>,
) {
    let server = HttpServer::new(config, router).with_shutdown_timeout(shutdown_timeout);
    let listener = server.bind().await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let shutdown_listener = shutdown.listener();
    let handle = tokio::spawn(server.serve(listener, shutdown_listener));

    (addr, shutdown, handle)
}

/// Send a minimal HTTP/1.1 request over a raw socket and return the full
/// response text.
#[allow(dead_code)]
pub async fn http_get(addr: SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    String::from_utf8_lossy(&response).into_owned()
}
