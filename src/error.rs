//! Request-path error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Host not allowed: {0}")]
    HostNotAllowed(String),

    #[error("Upstream {target} unreachable: {source}")]
    Upstream {
        target: String,
        #[source]
        source: hyper_util::client::legacy::Error,
    },

    #[error("Request build failed: {0}")]
    RequestBuild(#[from] axum::http::Error),

    #[error("Outside of base {0}")]
    OutsideBase(String),
}

impl ProxyError {
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::HostNotAllowed(_) => "host_not_allowed",
            Self::Upstream { .. } => "upstream_unreachable",
            Self::RequestBuild(_) => "request_build_failed",
            Self::OutsideBase(_) => "outside_base",
        }
    }

    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::HostNotAllowed(_) => StatusCode::FORBIDDEN,
            Self::Upstream { .. } => StatusCode::BAD_GATEWAY,
            Self::RequestBuild(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::OutsideBase(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            Self::HostNotAllowed(host) => format!(
                "Blocked request. This host ({host:?}) is not allowed.\n\
                 To allow this host, add it to `server.allowed_hosts` in the dev server config."
            ),
            Self::OutsideBase(base) => {
                format!("The server is configured with a public base URL of {base}")
            }
            Self::Upstream { .. } => "Upstream request failed".to_owned(),

            // Hide internal details
            Self::RequestBuild(_) => "Internal server error".to_owned(),
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_codes() {
        assert_eq!(
            ProxyError::HostNotAllowed("evil.test".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ProxyError::OutsideBase("/app/".into()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn error_types() {
        assert_eq!(
            ProxyError::HostNotAllowed("evil.test".into()).error_type(),
            "host_not_allowed"
        );
    }

    #[tokio::test]
    async fn host_rejection_names_host() {
        let response = ProxyError::HostNotAllowed("evil.test".into()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("\"evil.test\""));
        assert!(text.contains("allowed_hosts"));
    }
}
