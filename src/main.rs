//! Server bootstrap binary.
//!
//! Loads layered configuration (defaults < file < environment), starts the
//! HTTP listener on a background task, and blocks the main task until
//! SIGINT/SIGTERM, then drains within the shutdown budget.
//!
//! Exit codes: 0 on graceful shutdown; 1 on configuration, listener, or
//! signal-registration failure.

use std::path::PathBuf;
use std::process;

use axum::Router;
use clap::Parser;

use service_bootstrap::config::{AppConfig, ConfigError, ConfigLoader, Defaults, FileFormat};
use service_bootstrap::lifecycle::signals;
use service_bootstrap::observability::logging;
use service_bootstrap::{HttpServer, Shutdown};

#[derive(Debug, Parser)]
#[command(name = "service-bootstrap", version, about = "HTTP server bootstrap template")]
struct Args {
    /// Extra directory searched for the configuration file before the
    /// standard locations
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Configuration file base name, without extension
    #[arg(long, default_value = "config")]
    config_name: String,

    /// Configuration file format (yaml or toml)
    #[arg(long, default_value = "yaml")]
    config_format: FileFormat,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    logging::init("service_bootstrap=info,tower_http=info");

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "Failed to load configuration");
            process::exit(1);
        }
    };

    tracing::info!(
        api_name = %config.api_name,
        bind_address = %config.server.bind_address,
        "Configuration loaded"
    );
    log_rendered(&config);

    // No routes are registered here; the router is an external collaborator.
    let server = HttpServer::new(config.server.clone(), Router::new());

    let listener = match server.bind().await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(error = %err, "Failed to start listener");
            process::exit(1);
        }
    };

    let shutdown = Shutdown::new();
    let shutdown_listener = shutdown.listener();
    let server_task = tokio::spawn(async move {
        if let Err(err) = server.serve(listener, shutdown_listener).await {
            tracing::error!(error = %err, "Server failed");
            process::exit(1);
        }
    });

    match signals::wait_for_signal().await {
        Ok(signal) => tracing::info!(signal, "Termination signal received"),
        Err(err) => {
            tracing::error!(error = %err, "Failed to register signal handlers");
            process::exit(1);
        }
    }

    shutdown.trigger();
    if server_task.await.is_err() {
        tracing::error!("Server task panicked during shutdown");
        process::exit(1);
    }
}

fn load_config(args: &Args) -> Result<AppConfig, ConfigError> {
    let mut search_paths: Vec<PathBuf> = Vec::new();
    if let Some(dir) = &args.config_dir {
        search_paths.push(dir.clone());
    }
    search_paths.push(PathBuf::from("/etc/app"));
    if let Some(home) = dirs::home_dir() {
        search_paths.push(home.join(".app"));
    }
    search_paths.push(PathBuf::from("."));
    if let Ok(cwd) = std::env::current_dir() {
        search_paths.push(cwd);
    }

    ConfigLoader::new(&args.config_name, args.config_format)
        .search_paths(search_paths)
        .defaults(Defaults::standard())
        .load()
}

/// Startup diagnostics only; the rendered form is not a stable contract.
fn log_rendered(config: &AppConfig) {
    if let Ok(rendered) = config.server.render() {
        tracing::debug!("Server configuration:\n{rendered}");
    }
    if let Ok(rendered) = config.database.render() {
        tracing::debug!("Database configuration:\n{rendered}");
    }
}
