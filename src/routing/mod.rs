//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → router.rs (route lookup, declaration order)
//!     → matcher.rs (evaluate prefix or pattern)
//!     → Return: Dispatch::Forward(route) or Dispatch::Local
//!
//! Route Compilation (at startup):
//!     ProxyRule[]
//!     → Compile matchers (prefix or regex)
//!     → Parse upstream targets
//!     → Freeze as immutable ProxyRouter
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always matches same route
//! - First match wins (ordered by declaration)

pub mod matcher;
pub mod router;
pub mod target;

pub use matcher::{Matcher, PathPatternMatcher, PathPrefixMatcher};
pub use router::{Dispatch, ProxyRouter, Route, RouteError};
pub use target::{TargetError, UpstreamTarget};
