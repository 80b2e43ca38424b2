use crate::app_state::AppState;
use crate::domain::HttpReqProperties;
use axum::{
    body::HttpBody,
    extract::{MatchedPath, Request, State},
    http::header::CONTENT_LENGTH,
    middleware::Next,
    response::Response,
};
use std::time::Instant;

/// Middleware recording every routed request on the HTTP recorder.
///
/// The `path` label is the route template (`/items/{id}`), never the raw URI,
/// so label cardinality stays bounded by the number of routes. Must be
/// installed with `route_layer`, which only runs it for matched routes.
pub async fn track_http_metrics(
    State(state): State<AppState>,
    matched: MatchedPath,
    req: Request,
    next: Next,
) -> Response {
    // ---
    let start = Instant::now();
    let method = req.method().to_string();
    let path = matched.as_str().to_string();

    let response = next.run(req).await;

    let props = HttpReqProperties {
        path,
        method,
        code: response.status().as_u16().to_string(),
    };
    state
        .http_recorder()
        .collect(&props, start.elapsed(), response_size(&response));

    response
}

/// Body size when known up front, else `Content-Length`, else 0 (streamed bodies).
fn response_size(response: &Response) -> usize {
    // ---
    response
        .body()
        .size_hint()
        .exact()
        .or_else(|| {
            response
                .headers()
                .get(CONTENT_LENGTH)?
                .to_str()
                .ok()?
                .parse::<u64>()
                .ok()
        })
        .unwrap_or(0) as usize
}
