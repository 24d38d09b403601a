use axum::{http::Request, middleware::Next, response::Response, body::Body};
use std::time::Instant;
use tracing::info;

/// Logs method, path, status and latency for every `/api` request.
pub async fn log_api_requests(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(req).await;

    if path.starts_with("/api") {
        let elapsed_ms = start.elapsed().as_millis();
        let status = response.status().as_u16();
        info!(
            method = %method,
            path = %path,
            status,
            elapsed_ms = elapsed_ms as u64,
            "{} {} {} in {}ms", method, path, status, elapsed_ms
        );
    }
    response
}
