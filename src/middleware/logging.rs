//! Per-request access log.
//!
//! Each request is logged once, against the route template it matched
//! (`/api/governance/proposals/:proposal_id`) rather than the raw path, so
//! proposal ids and wallets do not fan out into separate log keys.

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{debug, info, warn, Instrument};

/// Probe endpoints polled by the host; logged at DEBUG only.
const PROBE_PATHS: &[&str] = &["/", "/health"];

pub async fn request_logging(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| path.clone());
    let has_query = request.uri().query().is_some();

    let start = Instant::now();
    let span = tracing::info_span!("http_request", method = %method, route = %route);
    let response = next.run(request).instrument(span).await;
    let latency_ms = start.elapsed().as_millis() as u64;
    let status = response.status();

    if PROBE_PATHS.contains(&path.as_str()) {
        debug!(method = %method, path = %path, status = status.as_u16(), latency_ms, "Probe");
        return response;
    }

    match classify(status) {
        Outcome::ServerError => warn!(
            method = %method,
            route = %route,
            path = %path,
            status = status.as_u16(),
            latency_ms,
            "Request failed"
        ),
        Outcome::Rejected => info!(
            method = %method,
            route = %route,
            path = %path,
            has_query,
            status = status.as_u16(),
            latency_ms,
            "Request rejected"
        ),
        Outcome::Served => info!(
            method = %method,
            route = %route,
            status = status.as_u16(),
            latency_ms,
            "Request served"
        ),
    }

    response
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Served,
    Rejected,
    ServerError,
}

fn classify(status: StatusCode) -> Outcome {
    if status.is_server_error() {
        Outcome::ServerError
    } else if status.is_client_error() {
        Outcome::Rejected
    } else {
        Outcome::Served
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(StatusCode::OK), Outcome::Served);
        assert_eq!(classify(StatusCode::UNPROCESSABLE_ENTITY), Outcome::Rejected);
        assert_eq!(classify(StatusCode::NOT_FOUND), Outcome::Rejected);
        assert_eq!(classify(StatusCode::INTERNAL_SERVER_ERROR), Outcome::ServerError);
    }
}
