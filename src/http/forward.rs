//! Request forwarding to upstream targets.
//!
//! # Responsibilities
//! - Rewrite the request URI onto the route's target
//! - Stream method, headers and body through unchanged
//! - Stream the upstream response back unchanged
//! - Map transport failures to 502 Bad Gateway
//!
//! # Design Decisions
//! - Exactly one attempt per request; no retry, no backoff
//! - Host header is preserved (no origin rewriting)
//! - Hop-by-hop headers stripped automatically

use axum::{
    body::Body,
    http::{Request, Version},
    response::Response,
};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::error::ProxyError;
use crate::routing::Route;
use crate::security::headers::strip_hop_by_hop;

/// Client used for every upstream request.
pub type HttpClient = Client<HttpConnector, Body>;

/// Build the shared upstream client.
pub fn build_client() -> HttpClient {
    Client::builder(TokioExecutor::new()).build(HttpConnector::new())
}

/// Forward a request to the route's upstream and return its response.
pub async fn forward(
    client: &HttpClient,
    route: &Route,
    request: Request<Body>,
) -> Result<Response, ProxyError> {
    let target = route.target();
    let (mut parts, body) = request.into_parts();

    parts.uri = target.rewrite(&parts.uri)?;
    parts.version = Version::HTTP_11;
    strip_hop_by_hop(&mut parts.headers);

    tracing::debug!(
        context = %route.context(),
        method = %parts.method,
        upstream = %parts.uri,
        "Forwarding request"
    );

    let response: Response<Incoming> = client
        .request(Request::from_parts(parts, body))
        .await
        .map_err(|source| {
            let err = ProxyError::Upstream {
                target: target.to_string(),
                source,
            };
            tracing::error!(error_type = err.error_type(), error = %err, "Upstream error");
            err
        })?;

    tracing::debug!(status = %response.status(), "Upstream responded");
    Ok(response.map(Body::new))
}
