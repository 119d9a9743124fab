//! CLI module for blitz-gateway.
//!
//! This module provides the command-line interface that binds config loading,
//! logging, metrics, signal handling, and the server loop together.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use blitz_auth::{AccountRecord, MemoryStore, ReloadableStore, SqlStore, SqlStoreConfig};
use blitz_config::{
    apply_overrides, load_config, validate_config, AccountEntry, CliOverrides, Config,
    LoggingConfig,
};

use crate::{run_with_shutdown, CancellationToken, GatewayError};

/// Blitz-gate CLI arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "blitz-gateway", version, about = "Credential-verification gateway")]
pub struct GatewayArgs {
    /// Config file path (json/yaml/toml)
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(flatten)]
    pub overrides: CliOverrides,
}

/// Run the gateway with the given arguments.
pub async fn run(args: GatewayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(&args.config)?;
    apply_overrides(&mut config, &args.overrides);
    validate_config(&config)?;

    init_tracing(&config.logging);

    if let Some(listen) = &config.metrics.listen {
        match blitz_metrics::init_prometheus(listen) {
            Ok(()) => info!("metrics exporter listening on {}", listen),
            Err(e) => warn!("failed to start metrics exporter: {}", e),
        }
    }

    // Set up graceful shutdown on SIGTERM/SIGINT
    let shutdown = CancellationToken::new();
    let shutdown_signal = shutdown.clone();

    tokio::spawn(async move {
        shutdown_signal_handler().await;
        info!("shutdown signal received");
        shutdown_signal.cancel();
    });

    let store = Arc::new(build_store(&config).await?);

    // Set up SIGHUP handler for account reload (config-file accounts only)
    #[cfg(unix)]
    {
        let config_path = args.config.clone();
        let overrides = args.overrides.clone();
        let store_reload = store.clone();
        tokio::spawn(async move {
            reload_signal_handler(config_path, overrides, store_reload).await;
        });
    }

    run_with_shutdown(config, store, shutdown).await?;
    Ok(())
}

/// Build the account store from config: SQL when a database URL is set,
/// otherwise the inline account table.
async fn build_store(config: &Config) -> Result<ReloadableStore, GatewayError> {
    match &config.auth.database_url {
        Some(url) => {
            let sql_config = SqlStoreConfig::new(url)
                .max_connections(config.auth.db_max_connections)
                .min_connections(config.auth.db_min_connections)
                .connect_timeout(Duration::from_secs(config.auth.db_connect_timeout_secs));
            let store = SqlStore::connect(sql_config).await?;
            info!(db = ?store.database_type(), "account store connected");
            Ok(ReloadableStore::new(store))
        }
        None => {
            info!(
                account_count = config.auth.accounts.len(),
                "using inline account table"
            );
            Ok(ReloadableStore::new(memory_store(&config.auth.accounts)))
        }
    }
}

fn memory_store(entries: &[AccountEntry]) -> MemoryStore {
    MemoryStore::from_records(entries.iter().map(entry_to_record))
}

fn entry_to_record(entry: &AccountEntry) -> AccountRecord {
    AccountRecord {
        identity: entry.identity.clone(),
        secret: entry.secret.clone(),
        blocked: entry.blocked,
        unlimited: entry.unlimited,
        max_usage_bytes: entry.max_usage_bytes,
        expiration_days: entry.expiration_days,
        created_on: entry.created_on.clone(),
        uploaded_bytes: entry.uploaded_bytes,
        downloaded_bytes: entry.downloaded_bytes,
    }
}

/// Wait for shutdown signals (SIGTERM, SIGINT).
async fn shutdown_signal_handler() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {}", e);
            // Fall back to waiting forever
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("failed to listen for SIGTERM: {}", e);
                // Fall back to waiting forever
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

/// Handle SIGHUP for account reload (Unix only).
#[cfg(unix)]
async fn reload_signal_handler(
    config_path: PathBuf,
    overrides: CliOverrides,
    store: Arc<ReloadableStore>,
) {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sighup = match signal(SignalKind::hangup()) {
        Ok(sig) => sig,
        Err(e) => {
            warn!(
                "failed to install SIGHUP handler: {}, account reload disabled",
                e
            );
            return;
        }
    };

    loop {
        sighup.recv().await;
        info!("SIGHUP received, reloading accounts");

        match reload_accounts(&config_path, &overrides, &store) {
            Ok(()) => info!("accounts reloaded successfully"),
            Err(e) => warn!("failed to reload accounts: {}", e),
        }
    }
}

/// Reload inline accounts from the config file.
#[cfg(unix)]
fn reload_accounts(
    config_path: &PathBuf,
    overrides: &CliOverrides,
    store: &Arc<ReloadableStore>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(config_path)?;
    apply_overrides(&mut config, overrides);
    validate_config(&config)?;

    if config.auth.database_url.is_some() {
        // SQL lookups already see fresh rows on every request.
        info!("database-backed store, nothing to reload");
        return Ok(());
    }

    store.reload(memory_store(&config.auth.accounts));
    info!(
        account_count = config.auth.accounts.len(),
        "inline accounts reloaded"
    );

    // Note: listen address and delay changes require a restart.

    Ok(())
}

/// Initialize tracing subscriber with the given logging configuration.
///
/// Supports:
/// - `level`: Base log level (trace, debug, info, warn, error)
/// - `format`: Output format (json, pretty, compact). Default: pretty
/// - `output`: Output target (stdout, stderr). Default: stderr
/// - `filters`: Per-module log level overrides
fn init_tracing(config: &LoggingConfig) {
    // Build the env filter from base level and per-module filters
    let base_level = config.level.as_deref().unwrap_or("info");
    let mut filter_str = base_level.to_string();

    for (module, level) in &config.filters {
        filter_str.push(',');
        filter_str.push_str(module);
        filter_str.push('=');
        filter_str.push_str(level);
    }

    let filter = EnvFilter::try_new(&filter_str).unwrap_or_else(|_| EnvFilter::new("info"));

    let format = config.format.as_deref().unwrap_or("pretty");
    let output = config.output.as_deref().unwrap_or("stderr");

    match (format, output) {
        ("json", "stdout") => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(io::stdout))
                .init();
        }
        ("json", _) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(io::stderr))
                .init();
        }
        ("compact", "stdout") => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().compact().with_writer(io::stdout))
                .init();
        }
        ("compact", _) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
        (_, "stdout") => {
            // pretty is default
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(io::stdout))
                .init();
        }
        _ => {
            // pretty to stderr is default
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(io::stderr))
                .init();
        }
    }
}
