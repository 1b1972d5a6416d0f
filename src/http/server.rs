//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the dispatch handler
//! - Wire up middleware (tracing, host check)
//! - Bind server to listener
//! - Dispatch requests to the proxy table or local assets

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware,
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::DevServerConfig;
use crate::http::assets::LocalAssets;
use crate::http::forward::{build_client, forward, HttpClient};
use crate::lifecycle::ShutdownSignal;
use crate::observability::tracing::make_request_span;
use crate::routing::{Dispatch, ProxyRouter, RouteError};
use crate::security::{host_check_middleware, HostAllowList};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ProxyRouter>,
    pub client: HttpClient,
    pub assets: LocalAssets,
}

/// HTTP server for the dev router.
pub struct HttpServer {
    router: Router,
    config: DevServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails if a proxy rule does not compile.
    pub fn new(config: DevServerConfig) -> Result<Self, RouteError> {
        let proxy_router = Arc::new(ProxyRouter::from_rules(&config.server.proxy)?);
        let allow_list = Arc::new(HostAllowList::from_config(&config.server.allowed_hosts));

        let state = AppState {
            router: proxy_router,
            client: build_client(),
            assets: LocalAssets::new(&config.server.root, config.server.normalized_base()),
        };

        let router = Self::build_router(state, allow_list);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState, allow_list: Arc<HostAllowList>) -> Router {
        Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(middleware::from_fn_with_state(allow_list, host_check_middleware))
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
    }

    /// The assembled Axum router, for serving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.triggered().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &DevServerConfig {
        &self.config
    }
}

/// Forward to the first matching upstream, or serve locally.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let result = match state.router.dispatch(&request) {
        Dispatch::Forward(route) => forward(&state.client, route, request).await,
        Dispatch::Local => {
            tracing::trace!(path = %request.uri().path(), "Serving locally");
            state.assets.serve(request).await
        }
    };

    result.unwrap_or_else(IntoResponse::into_response)
}
