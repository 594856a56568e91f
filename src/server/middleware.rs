use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::info;

/// Log every request and its response status with latency
pub async fn request_response_logger(req: Request<Body>, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    info!(method = %method, path = %path, "Request");

    let start = Instant::now();
    let response = next.run(req).await;
    let duration = start.elapsed();

    info!(
        method = %method,
        path = %path,
        status = %response.status().as_u16(),
        latency_ms = %duration.as_millis(),
        "Response"
    );

    response
}
