use anyhow::Result;
use app_metrics::{
    create_noop_recorders, create_prom_recorders, create_router, instrument_pool, AppConfig,
    AppState, CollectHook, InstrumentedConnection, MetricsBackend,
};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber to log to stdout
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;

    let registry = prometheus::default_registry().clone();
    let recorders = match config.metrics.backend {
        MetricsBackend::Prometheus => create_prom_recorders(&registry, &config.metrics)?,
        MetricsBackend::Noop => create_noop_recorders()?,
    };

    let mut state = AppState::new(registry, recorders.clone());

    if let Some(url) = &config.server.redis_url {
        // ---
        let client = redis::Client::open(url.as_str())?;
        let conn = client.get_multiplexed_async_connection().await?;
        let hook = CollectHook::shared(recorders.redis.clone());
        state = state.with_redis(InstrumentedConnection::new(conn, hook));
        info!("Redis commands are instrumented");
    }

    if let Some(url) = &config.server.database_url {
        // ---
        let pool = instrument_pool(PgPoolOptions::new(), recorders.postgres.clone())
            .connect(url)
            .await?;
        state = state.with_pool(pool);
        info!("Postgres pool is instrumented");
    }

    let app = create_router(state);

    info!("Starting at endpoint:{}", config.server.bind_addr);
    info!(
        "Starting App Metrics server v{} for {}...",
        env!("CARGO_PKG_VERSION"),
        config.metrics.service_name
    );

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    recorders.unregister_all()?;
    info!("Recorders unregistered, bye");

    Ok(())
}

async fn shutdown_signal() {
    // ---
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
    }
}
