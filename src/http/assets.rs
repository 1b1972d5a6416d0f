//! Local asset resolution for requests no proxy rule claims.
//!
//! # Responsibilities
//! - Serve files from the configured root
//! - Strip the public base path before lookup
//! - Fall back to `index.html` for client-side routes

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{uri::PathAndQuery, Request, Uri},
    response::Response,
};
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

use crate::error::ProxyError;

/// Static file service rooted at the asset directory.
#[derive(Debug, Clone)]
pub struct LocalAssets {
    base: Arc<str>,
    service: ServeDir<ServeFile>,
}

impl LocalAssets {
    /// `base` must already be normalized (leading and trailing `/`).
    pub fn new(root: &Path, base: impl Into<Arc<str>>) -> Self {
        let index = root.join("index.html");
        Self {
            base: base.into(),
            service: ServeDir::new(root).fallback(ServeFile::new(index)),
        }
    }

    /// Serve a request from disk.
    pub async fn serve(&self, request: Request<Body>) -> Result<Response, ProxyError> {
        let request = self.strip_base(request)?;

        let response = match self.service.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };
        Ok(response.map(Body::new))
    }

    /// Rewrite `/<base>/rest?q` to `/rest?q`.
    fn strip_base(&self, mut request: Request<Body>) -> Result<Request<Body>, ProxyError> {
        if &*self.base == "/" {
            return Ok(request);
        }

        let path = request.uri().path();
        let rest = match path.strip_prefix(&*self.base) {
            Some(rest) => rest,
            None if path == self.base.trim_end_matches('/') => "",
            None => return Err(ProxyError::OutsideBase(self.base.to_string())),
        };

        let path_and_query = match request.uri().query() {
            Some(query) => format!("/{}?{}", rest, query),
            None => format!("/{}", rest),
        };

        let mut parts = request.uri().clone().into_parts();
        parts.path_and_query =
            Some(PathAndQuery::from_str(&path_and_query).map_err(axum::http::Error::from)?);
        *request.uri_mut() = Uri::from_parts(parts).map_err(axum::http::Error::from)?;
        Ok(request)
    }
}
