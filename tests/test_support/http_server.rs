use anyhow::Result;

use usercrud_server::config::ServerConfig;
use usercrud_server::lifecycle::{self, RunningTestHttpServer};

/// A near-production HTTP server instance for tests.
///
/// Uses the real `lifecycle::bootstrap()` and `run_for_tests()` wiring.
pub struct HttpTestServer {
    pub base_url: String,
    running: RunningTestHttpServer,
}

impl HttpTestServer {
    pub async fn shutdown(self) {
        self.running.shutdown().await;
    }
}

/// Start a near-production HTTP server on a random available port.
///
/// This is intended for integration tests that want to drive a real server
/// instance with `reqwest`.
pub async fn start_http_test_server() -> Result<HttpTestServer> {
    let mut config = ServerConfig::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.workers = 1;

    let components = lifecycle::bootstrap();
    let running = lifecycle::run_for_tests(&config, components).await?;
    let base_url = running.base_url.clone();

    Ok(HttpTestServer { base_url, running })
}

/// Run a test closure against a freshly started HTTP test server, then shut
/// it down.
///
/// This keeps tests concise and prevents forgetting `shutdown()`.
pub async fn with_http_test_server<T, F>(f: F) -> Result<T>
where
    F: for<'a> FnOnce(
        &'a HttpTestServer,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<T>> + 'a>>,
{
    let server = start_http_test_server().await?;
    let result = f(&server).await;
    server.shutdown().await;
    result
}
