//! Main application entry point (service binary).
//!
//! This is a thin wrapper around the `link_unwrapper` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Registry construction and serving
//!
//! All core functionality is implemented in the library crate.

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use link_unwrapper::initialization::init_logger_with;
use link_unwrapper::{load_resolver_configs, start_server, AppState, Config, Registry};

#[tokio::main]
async fn main() {
    // A missing .env is the normal case
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    if let Err(e) = run(config).await {
        eprintln!("link_unwrapper error: {:#}", e);
        process::exit(1);
    }
}

async fn run(config: Config) -> Result<()> {
    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    info!(
        "Starting unwrapper service on {} (upstream DNS {})",
        config.listen_addr(),
        config.upstream_dns
    );

    let configs = load_resolver_configs(config.unwrappers.as_deref())?;
    let registry = Registry::build(&configs, &config.upstream_dns)
        .context("Failed to build unwrapper registry")?;
    info!("Loaded {} link unwrappers", registry.len());

    let state = AppState::new(Arc::new(registry), config.max_hops);
    start_server(&config.listen_addr(), state).await
}
