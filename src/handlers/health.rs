use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

#[derive(Deserialize)]
pub struct HealthQuery {
    mode: Option<String>,
}

/// Responds with the health status of the server.
///
/// - By default, performs a light check confirming the web server is running.
/// - With `mode=full`, also pings Redis and runs `SELECT 1` on Postgres when
///   they are configured. Both probes go through the instrumented paths, so
///   they show up in the Redis and Postgres metrics.
///
/// # Responses
/// - `200 OK` with `{"status":"ok"}` when every configured backend answers.
/// - `500 INTERNAL SERVER ERROR` with `{"status":"error"}` otherwise.
pub async fn health_check(
    State(state): State<AppState>,
    Query(params): Query<HealthQuery>,
) -> (StatusCode, Json<HealthResponse>) {
    // ---
    let healthy = match params.mode.as_deref() {
        Some("full") => redis_healthy(&state).await && postgres_healthy(&state).await,
        _ => true,
    };

    if healthy {
        (StatusCode::OK, Json(HealthResponse { status: "ok" }))
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(HealthResponse { status: "error" }),
        )
    }
}

async fn redis_healthy(state: &AppState) -> bool {
    // ---
    let Some(mut conn) = state.redis_conn() else {
        return true;
    };

    match redis::cmd("PING").query_async::<String>(&mut conn).await {
        Ok(_) => true,
        Err(err) => {
            tracing::error!("Redis ping failed: {:?}", err);
            false
        }
    }
}

async fn postgres_healthy(state: &AppState) -> bool {
    // ---
    let Some(pool) = state.pool() else {
        return true;
    };

    match sqlx::query("SELECT 1").execute(pool).await {
        Ok(_) => true,
        Err(err) => {
            tracing::error!("Postgres probe failed: {:?}", err);
            false
        }
    }
}
