use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, info_span, Instrument};

/// Unmatched requests share one label so arbitrary paths never reach the logs.
const UNMATCHED_ROUTE: &str = "<unmatched>";

pub(crate) fn route_label(request: &Request) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}

pub(crate) async fn trace_requests(request: Request, next: Next) -> Response {
    let span = info_span!(
        "http.request",
        method = %request.method(),
        route = %route_label(&request),
    );
    let started_at = Instant::now();

    let response = next.run(request).instrument(span.clone()).await;

    span.in_scope(|| {
        info!(
            status = response.status().as_u16(),
            latency_ms = started_at.elapsed().as_millis() as u64,
            "request completed"
        );
    });
    response
}
