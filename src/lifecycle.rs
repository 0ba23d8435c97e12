//! Server lifecycle management helpers.
//!
//! This module encapsulates bootstrapping the shared store, wiring the HTTP
//! server, and coordinating graceful shutdown, so `main.rs` stays a thin
//! orchestrator.

use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use anyhow::Result;
use log::{debug, info};

use crate::config::ServerConfig;
use crate::middleware;
use crate::routes;
use crate::store::{InMemoryUserStore, UserStore};

/// Aggregated application components shared across the HTTP server and
/// shutdown handling.
pub struct ApplicationComponents {
    pub user_store: Arc<dyn UserStore>,
}

/// Construct the shared application state. The store trait object is the
/// wiring point for alternative storage backends.
pub fn bootstrap() -> ApplicationComponents {
    let user_store: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
    debug!("In-memory user store initialized");

    ApplicationComponents { user_store }
}

/// Start the HTTP server and manage graceful shutdown.
pub async fn run(config: &ServerConfig, components: ApplicationComponents) -> Result<()> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting HTTP server on {}", bind_addr);

    let workers = if config.server.workers == 0 {
        num_cpus::get()
    } else {
        config.server.workers
    };
    info!(
        "Server config: workers={}, keepalive={}s",
        workers, config.server.keepalive_timeout
    );

    let user_store = components.user_store.clone();
    let cors_config = config.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::request_logger())
            .wrap(middleware::build_cors_from_config(&cors_config))
            .app_data(middleware::json_config())
            .app_data(web::Data::new(user_store.clone()))
            .configure(routes::configure)
    })
    .bind(&bind_addr)?
    .workers(workers)
    .keep_alive(Duration::from_secs(config.server.keepalive_timeout))
    .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    tokio::select! {
        result = server_task => {
            match result {
                Ok(Err(e)) => log::error!("Server task failed: {}", e),
                Err(e) => log::error!("Server task panicked: {}", e),
                Ok(Ok(())) => {}
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
            server_handle.stop(true).await;
            debug!("Graceful shutdown complete");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

/// A running HTTP server instance intended for integration tests.
///
/// This starts the same Actix app wiring as the production server
/// (middleware stack, route registration, app_data wiring) but binds to an
/// ephemeral port and provides an explicit shutdown handle.
pub struct RunningTestHttpServer {
    pub base_url: String,
    pub bind_addr: SocketAddr,
    server_handle: actix_web::dev::ServerHandle,
    server_task: tokio::task::JoinHandle<std::io::Result<()>>,
}

impl RunningTestHttpServer {
    pub async fn shutdown(self) {
        self.server_handle.stop(false).await;
        let _ = self.server_task.await;
    }
}

/// Start the HTTP server for integration tests on a random available port.
///
/// Notes:
/// - Does not install Ctrl+C handling.
/// - Caller must invoke `shutdown()` to stop the server.
pub async fn run_for_tests(
    config: &ServerConfig,
    components: ApplicationComponents,
) -> Result<RunningTestHttpServer> {
    let bind_ip = if config.server.host.is_empty() {
        "127.0.0.1"
    } else {
        config.server.host.as_str()
    };

    let listener = TcpListener::bind((bind_ip, 0))?;
    let bind_addr = listener.local_addr()?;

    let user_store = components.user_store.clone();
    let cors_config = config.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::request_logger())
            .wrap(middleware::build_cors_from_config(&cors_config))
            .app_data(middleware::json_config())
            .app_data(web::Data::new(user_store.clone()))
            .configure(routes::configure)
    })
    .listen(listener)?
    .workers(1)
    .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);
    let base_url = format!("http://{}", bind_addr);

    Ok(RunningTestHttpServer {
        base_url,
        bind_addr,
        server_handle,
        server_task,
    })
}
