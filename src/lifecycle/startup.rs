//! Startup orchestration.
//!
//! # Responsibilities
//! - Compile the proxy table
//! - Report registered plugins
//! - Bind the listener (strict or fallback port)
//! - Serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The listener binds last (traffic only when ready)

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::{ConfigError, DevServerConfig};
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::net::{self, ListenerError};
use crate::routing::RouteError;

/// Error type for startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid proxy table: {0}")]
    Route(#[from] RouteError),

    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the server, bind it, and serve until `shutdown` fires.
pub async fn start(config: DevServerConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    let shutdown_rx = shutdown.subscribe();
    let server = HttpServer::new(config)?;
    let server_config = &server.config().server;

    tracing::info!(
        routes = server_config.proxy.len(),
        base = %server_config.normalized_base(),
        root = %server_config.root.display(),
        "Configuration loaded"
    );
    for plugin in &server_config.plugins {
        tracing::info!(plugin = %plugin, "Plugin registered");
    }
    for rule in &server_config.proxy {
        tracing::info!(context = %rule.context, upstream = %rule.target, "Proxy rule");
    }

    let listener = net::bind(server_config).await?;
    log_urls(listener.local_addr()?, server_config.host);

    server.run(listener, shutdown_rx).await?;
    Ok(())
}

fn log_urls(addr: SocketAddr, all_interfaces: bool) {
    tracing::info!(url = %format!("http://localhost:{}/", addr.port()), "Local");
    if all_interfaces {
        tracing::info!(url = %format!("http://{}/", addr), "Network");
    } else {
        tracing::info!("Network: use --host to expose");
    }
}
