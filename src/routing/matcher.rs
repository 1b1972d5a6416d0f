//! Route matching logic.
//!
//! # Responsibilities
//! - Match a literal path prefix (case-sensitive)
//! - Match a regular expression against the full path
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Query strings never take part in matching
//! - Patterns are compiled once, at startup

use std::fmt;

use axum::body::Body;
use axum::http::Request;
use regex::Regex;

/// Marker that turns a proxy context into a regular expression.
pub const PATTERN_PREFIX: char = '^';

/// Trait for matching requests against conditions.
pub trait Matcher: Send + Sync + fmt::Debug {
    /// Returns true if the request path matches this condition.
    fn matches_path(&self, path: &str) -> bool;

    /// Returns true if the request matches this condition.
    fn matches(&self, req: &Request<Body>) -> bool {
        self.matches_path(req.uri().path())
    }
}

/// Matches the request path prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches_path(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }
}

/// Matches the request path against a regular expression.
#[derive(Debug, Clone)]
pub struct PathPatternMatcher {
    pattern: Regex,
}

impl PathPatternMatcher {
    /// Compile a new pattern matcher.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl Matcher for PathPatternMatcher {
    fn matches_path(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }
}

/// Build the matcher a proxy context describes.
///
/// Contexts starting with `^` are regular expressions, anything else is a
/// literal prefix.
pub fn matcher_for(context: &str) -> Result<Box<dyn Matcher>, regex::Error> {
    if context.starts_with(PATTERN_PREFIX) {
        Ok(Box::new(PathPatternMatcher::new(context)?))
    } else {
        Ok(Box::new(PathPrefixMatcher::new(context)))
    }
}
