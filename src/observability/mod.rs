//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → tracing.rs (request spans with correlation IDs)
//!
//! Consumers:
//!     → stdout via tracing-subscriber fmt layer
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every log line of a request via its span

pub mod logging;
pub mod tracing;
