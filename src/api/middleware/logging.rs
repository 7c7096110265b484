//! Request/response logging with timing, correlated by request id.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{Level, info, span};

use super::RequestId;

pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let span = span!(
        Level::INFO,
        "http_request",
        method = %method,
        path = %uri.path(),
        request_id = %request_id
    );
    let _enter = span.enter();

    info!("Request received");

    let start = Instant::now();
    let response = next.run(request).await;

    info!(
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Response sent"
    );

    response
}
