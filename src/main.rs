// usercrud-server entrypoint
//!
//! The heavy lifting (configuration, logging, server wiring, graceful
//! shutdown) lives in dedicated modules so this file remains a thin
//! orchestrator.

use anyhow::Result;
use log::info;

use usercrud_server::config::ServerConfig;
use usercrud_server::{lifecycle, logging};

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration (fallback to defaults when config file missing)
    let config_path = "config.toml";
    let config = match ServerConfig::load(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("FATAL: Failed to load {}: {}", config_path, e);
            std::process::exit(1);
        }
    };

    // Logging before any other side effects
    logging::init_logging(
        &config.logging.level,
        &config.logging.file_path,
        config.logging.log_to_console,
        &config.logging.format,
    )?;

    info!("usercrud-server v{}", env!("CARGO_PKG_VERSION"));
    info!("Host: {}  Port: {}", config.server.host, config.server.port);

    // Build application state
    let components = lifecycle::bootstrap();

    // Run HTTP server until termination signal is received
    lifecycle::run(&config, components).await
}
