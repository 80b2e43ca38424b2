use crate::app_state::AppState;
use crate::infrastructure::{content_type, render};
use axum::{extract::State, http::header::CONTENT_TYPE, http::StatusCode, response::IntoResponse};

/// Handler for the `/metrics` endpoint.
///
/// Returns every metric in the application registry in Prometheus text
/// format for scraping.
pub async fn metrics_handler(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, StatusCode> {
    // ---
    let metrics_text = render(app_state.registry()).map_err(|err| {
        tracing::error!("Failed to render metrics: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok((StatusCode::OK, [(CONTENT_TYPE, content_type())], metrics_text))
}
