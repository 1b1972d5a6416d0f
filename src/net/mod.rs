//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ServerConfig (host, port, strict_port)
//!     → listener.rs (bind, port conflict handling)
//!     → Hand off to HTTP layer (axum::serve)
//! ```
//!
//! # Design Decisions
//! - Port conflicts are fatal under strict binding
//! - Loopback only unless all interfaces are requested

pub mod listener;

pub use listener::{bind, ListenerError};
