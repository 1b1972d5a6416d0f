//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → host_check.rs (Host header allow-list, 403 on mismatch)
//!     → Pass to routing
//!
//! Forwarded request:
//!     → headers.rs (strip hop-by-hop headers)
//! ```
//!
//! # Design Decisions
//! - Fail closed: a missing or unknown Host is rejected
//! - Rejected requests never reach the upstream or the asset root

pub mod headers;
pub mod host_check;

pub use host_check::{host_check_middleware, HostAllowList};
