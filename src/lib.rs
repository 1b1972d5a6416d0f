//! Development server with an ordered proxy table.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ net::listener ──▶ http::server ──▶ security::host_check
//!                                                              │
//!                                                              ▼
//!                                                     routing::ProxyRouter
//!                                                    (first match, in order)
//!                                                     │                 │
//!                                            Forward(route)           Local
//!                                                     ▼                 ▼
//!                                          http::forward          http::assets
//!                                          (one attempt,          (ServeDir over
//!                                           502 on failure)        the root)
//!                                                     │
//!                                                     ▼
//!                                              Upstream backend
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;
pub mod security;

pub use config::DevServerConfig;
pub use error::ProxyError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
