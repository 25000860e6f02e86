//! dyndnsd - dynamic DNS update server
//!
//! Thin integration layer: loads the config file, wires the provider client
//! into the HTTP endpoint, and serves until SIGTERM/SIGINT. All
//! reconciliation logic lives in `dyndns-core`.
//!
//! ## Usage
//!
//! ```bash
//! dyndnsd --config /etc/dyndns/config.toml
//! ```
//!
//! A minimal config file:
//!
//! ```toml
//! [server]
//! bind_host = "127.0.0.1"
//! bind_port = 8080
//! allowed_domains = ["home.example.com"]
//!
//! [provider]
//! apikey = "pk1_..."
//! secretapikey = "sk1_..."
//! default_ttl = 300
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use dyndns_core::{Config, DnsClient};
use dyndnsd::http::{AppState, router};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum ServerExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<ServerExitCode> for ExitCode {
    fn from(code: ServerExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Dynamic DNS update server
#[derive(Debug, Parser)]
#[command(name = "dyndnsd", version, about)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

/// Load and validate the configuration file
fn load_config(path: &Path) -> Result<Config> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;

    let config: Config = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e:#}");
            return ServerExitCode::ConfigError.into();
        }
    };

    // Initialize tracing
    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
        return ServerExitCode::ConfigError.into();
    }

    info!("Starting dyndnsd");

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {e}");
            return ServerExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        match run_server(config).await {
            Ok(()) => ServerExitCode::CleanShutdown,
            Err(e) => {
                error!("Server error: {e:#}");
                ServerExitCode::RuntimeError
            }
        }
    })
    .into()
}

/// Run the HTTP server until a shutdown signal arrives
async fn run_server(config: Config) -> Result<()> {
    let client = DnsClient::new(&config.provider)?;

    match &config.server.allowed_domains {
        Some(domains) => info!("Allow-list active for {} domain(s)", domains.len()),
        None => info!("No allow-list configured; updates accepted for any domain"),
    }

    let state = AppState::new(client, config.server.allowed_domains.clone());
    let app = router(state);

    let addr = format!("{}:{}", config.server.bind_host, config.server.bind_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Shutting down");
    Ok(())
}

/// Wait for a shutdown signal (SIGTERM or SIGINT)
#[cfg(unix)]
async fn shutdown_signal() {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to setup SIGTERM handler: {e}");
            return;
        }
    };
    let mut sigint = match signal(SignalKind::interrupt()) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to setup SIGINT handler: {e}");
            return;
        }
    };

    let received = tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    };
    info!("Received shutdown signal: {received}");
}

/// Wait for CTRL-C (fallback for non-Unix platforms)
#[cfg(not(unix))]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to wait for CTRL-C: {e}");
    } else {
        info!("Received shutdown signal: SIGINT");
    }
}
