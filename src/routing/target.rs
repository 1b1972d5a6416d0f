//! Upstream target parsing and URI rewriting.

use std::fmt;
use std::str::FromStr;

use axum::http::uri::{Authority, InvalidUri, PathAndQuery, Scheme};
use axum::http::Uri;
use thiserror::Error;
use url::Url;

/// Error type for upstream target parsing.
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("invalid target URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("unsupported target scheme {0:?}, only http upstreams are supported")]
    UnsupportedScheme(String),

    #[error("target URL has no host")]
    MissingHost,

    #[error("target URL must not carry a query or fragment")]
    QueryOrFragment,

    #[error("invalid target authority: {0}")]
    Authority(#[from] InvalidUri),
}

/// Upstream base URL that matching requests are forwarded to.
#[derive(Debug, Clone)]
pub struct UpstreamTarget {
    url: Url,
    authority: Authority,
    /// Target path without trailing slash, prepended to the request path.
    base_path: String,
}

impl UpstreamTarget {
    /// Parse a target such as `http://localhost:8080` or `http://api:3000/v1`.
    pub fn parse(target: &str) -> Result<Self, TargetError> {
        let url = Url::parse(target)?;

        if url.scheme() != "http" {
            return Err(TargetError::UnsupportedScheme(url.scheme().to_string()));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(TargetError::QueryOrFragment);
        }

        let host = match url.host_str() {
            Some(h) if !h.is_empty() => h,
            _ => return Err(TargetError::MissingHost),
        };
        let authority = match url.port() {
            Some(port) => Authority::from_str(&format!("{}:{}", host, port))?,
            None => Authority::from_str(host)?,
        };
        let base_path = url.path().trim_end_matches('/').to_string();

        Ok(Self {
            url,
            authority,
            base_path,
        })
    }

    /// Authority (`host[:port]`) requests are sent to.
    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    /// Build the upstream URI for an inbound request URI.
    ///
    /// The inbound path and query are kept verbatim and appended to the
    /// target's own path.
    pub fn rewrite(&self, inbound: &Uri) -> Result<Uri, axum::http::Error> {
        let tail = inbound
            .path_and_query()
            .map(PathAndQuery::as_str)
            .unwrap_or("/");

        Ok(Uri::builder()
            .scheme(Scheme::HTTP)
            .authority(self.authority.clone())
            .path_and_query(format!("{}{}", self.base_path, tail))
            .build()?)
    }
}

impl fmt::Display for UpstreamTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}
