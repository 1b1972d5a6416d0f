//! `Host` header allow-list.
//!
//! Requests addressed to a hostname the dev server does not recognise are
//! rejected with 403 before routing. IP literals and `localhost` are always
//! accepted.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::AllowedHosts;
use crate::error::ProxyError;

/// Compiled allow-list of `Host` header values.
#[derive(Debug, Clone, Default)]
pub struct HostAllowList {
    any: bool,
    /// Lowercased entries. A leading `.` covers the domain and its subdomains.
    entries: Vec<String>,
}

impl HostAllowList {
    pub fn from_config(allowed: &AllowedHosts) -> Self {
        match allowed {
            AllowedHosts::Any(any) => Self {
                any: *any,
                entries: Vec::new(),
            },
            AllowedHosts::List(list) => Self {
                any: false,
                entries: list.iter().map(|h| h.trim().to_ascii_lowercase()).collect(),
            },
        }
    }

    /// True when the host check is disabled.
    pub fn allows_any(&self) -> bool {
        self.any
    }

    /// Check a raw `Host` header value (`name[:port]`).
    pub fn is_allowed(&self, host: &str) -> bool {
        if self.any {
            return true;
        }

        let host = host.trim();
        if host.is_empty() {
            return false;
        }

        if let Some(rest) = host.strip_prefix('[') {
            let Some((addr, after)) = rest.split_once(']') else {
                return false;
            };
            return addr.parse::<Ipv6Addr>().is_ok() && is_port_suffix(after);
        }

        let hostname = match host.split_once(':') {
            Some((name, _port)) => name,
            None => host,
        }
        .to_ascii_lowercase();

        if hostname.parse::<Ipv4Addr>().is_ok() {
            return true;
        }
        if hostname == "localhost" || hostname.ends_with(".localhost") {
            return true;
        }

        self.entries.iter().any(|entry| {
            if *entry == hostname {
                return true;
            }
            match entry.strip_prefix('.') {
                Some(domain) => domain == hostname || hostname.ends_with(entry.as_str()),
                None => false,
            }
        })
    }
}

/// Empty, or `:` followed by at least one digit.
fn is_port_suffix(s: &str) -> bool {
    match s.strip_prefix(':') {
        Some(port) => !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()),
        None => s.is_empty(),
    }
}

/// Host value the client addressed: `Host` header, or the URI authority for HTTP/2.
fn request_host(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| req.uri().authority().map(|a| a.as_str()))
}

/// Reject requests whose host is not on the allow-list.
pub async fn host_check_middleware(
    State(allow_list): State<Arc<HostAllowList>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if allow_list.allows_any() {
        return next.run(req).await;
    }

    let host = request_host(&req).map(str::to_owned);
    match host {
        Some(host) if allow_list.is_allowed(&host) => next.run(req).await,
        other => {
            let err = ProxyError::HostNotAllowed(other.unwrap_or_default());
            tracing::warn!(
                error_type = err.error_type(),
                error = %err,
                path = %req.uri().path(),
                "Blocked request for unrecognized host"
            );
            err.into_response()
        }
    }
}
