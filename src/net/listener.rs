//! TCP listener binding with strict port semantics.
//!
//! # Responsibilities
//! - Pick the bind interface (all interfaces or loopback)
//! - Bind the configured port
//! - With `strict_port`, fail when the port is taken
//! - Without it, walk up to the next free port

use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServerConfig;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Strict binding and the port is occupied.
    #[error("Port {port} is already in use")]
    PortInUse { port: u16 },

    /// Failed to bind to address.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// Every port from the configured one upwards is taken.
    #[error("No free port available from {start} upwards")]
    NoFreePort { start: u16 },
}

/// Interface the server listens on.
pub fn bind_ip(config: &ServerConfig) -> IpAddr {
    if config.host {
        IpAddr::V4(Ipv4Addr::UNSPECIFIED)
    } else {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    }
}

/// Bind the dev server listener.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, ListenerError> {
    let ip = bind_ip(config);
    let mut port = config.port;

    loop {
        let addr = SocketAddr::new(ip, port);
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                let local_addr = listener
                    .local_addr()
                    .map_err(|source| ListenerError::Bind { addr, source })?;
                tracing::info!(
                    address = %local_addr,
                    strict_port = config.strict_port,
                    "Listener bound"
                );
                return Ok(listener);
            }
            Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
                if config.strict_port {
                    return Err(ListenerError::PortInUse { port });
                }
                if port == u16::MAX {
                    return Err(ListenerError::NoFreePort { start: config.port });
                }
                tracing::info!(port, "Port is in use, trying another one");
                port += 1;
            }
            Err(source) => return Err(ListenerError::Bind { addr, source }),
        }
    }
}
