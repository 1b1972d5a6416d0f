//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → security::host_check (Host allow-list)
//!     → routing (first matching rule)
//!     → forward.rs (single upstream attempt)   | assets.rs (local files)
//!     → Send to client
//! ```

pub mod assets;
pub mod forward;
pub mod server;

pub use assets::LocalAssets;
pub use server::HttpServer;
