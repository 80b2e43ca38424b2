use anyhow::{ensure, Result};
use app_metrics::{create_prom_recorders, create_router, AppState};
use prometheus::Registry;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::sleep;

mod common;

/// Serves the router on an ephemeral port and talks to it over real TCP.
struct TestServer {
    pub addr: std::net::SocketAddr,
    pub registry: Registry,
}

impl TestServer {
    // ---
    pub async fn new() -> Self {
        // --
        common::init_tracing();

        let registry = Registry::new();
        let recorders =
            create_prom_recorders(&registry, &common::metrics_config()).expect("create recorders");
        let app = create_router(AppState::new(registry.clone(), recorders));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Spawn the server in the background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start
        sleep(Duration::from_millis(100)).await;

        Self { addr, registry }
    }

    /// Minimal HTTP/1.1 GET, returning the raw response.
    pub async fn get(&self, path: &str) -> Result<String> {
        // ---
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let mut stream = tokio::net::TcpStream::connect(self.addr).await?;
        let request = format!("GET {path} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n", self.addr);
        stream.write_all(request.as_bytes()).await?;

        let mut response = String::new();
        stream.read_to_string(&mut response).await?;
        Ok(response)
    }
}

#[tokio::test]
async fn root_endpoint_lists_metrics() -> Result<()> {
    // ---
    let server = TestServer::new().await;

    let response = server.get("/").await?;
    ensure!(response.starts_with("HTTP/1.1 200"), "unexpected response: {response}");
    ensure!(response.contains("/metrics"), "root page should mention /metrics");

    Ok(())
}

#[tokio::test]
async fn served_requests_show_up_in_scrape() -> Result<()> {
    // ---
    let server = TestServer::new().await;

    let _ = server.get("/health").await?;
    let response = server.get("/metrics").await?;

    ensure!(response.starts_with("HTTP/1.1 200"), "unexpected response: {response}");
    ensure!(
        response.contains(r#"app_http_requests_total{application="test-app",method="GET",path="/health",status="200"} 1"#),
        "health request missing from scrape: {response}"
    );

    // The registry behind the server sees the same data.
    let samples = common::scrape(&server.registry);
    ensure!(samples.iter().any(|s| s.name == "app_http_request_duration_seconds_count"));

    Ok(())
}
