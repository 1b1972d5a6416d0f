//! Per-request spans.
//!
//! Every request gets a span carrying a UUID request id, the method and the
//! URI. The id lives only in the span; forwarded headers are left alone.

use axum::http::Request;
use tracing::Span;
use uuid::Uuid;

/// `TraceLayer::make_span_with` callback.
pub fn make_request_span<B>(request: &Request<B>) -> Span {
    let request_id = Uuid::new_v4();
    tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
    )
}
