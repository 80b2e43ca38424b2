use axum::response::IntoResponse;

pub async fn root_handler() -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");
    format!(
        r#"App Metrics demo 👋
Version: {version}

Available endpoints:
  - GET    /                  - This page
  - GET    /health            - Light health check
  - GET    /health?mode=full  - Full health check (pings Redis and Postgres when configured)
  - GET    /metrics           - Prometheus text exposition
"#
    )
}
