//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Compile every proxy rule so bad patterns and targets fail at load time
//! - Validate the base path and log level
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DevServerConfig → Result<(), ValidationErrors>
//! - Runs before config is accepted into the system

use std::fmt;

use thiserror::Error;

use crate::config::schema::DevServerConfig;
use crate::routing::{Route, RouteError};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("proxy rule #{index} ({context:?}): context must not be empty")]
    EmptyContext { index: usize, context: String },

    #[error("proxy rule #{index} ({context:?}): {source}")]
    Route {
        index: usize,
        context: String,
        #[source]
        source: RouteError,
    },

    #[error("base {0:?} must be a path without query or fragment")]
    InvalidBase(String),

    #[error("unknown log level {0:?}")]
    InvalidLogLevel(String),
}

/// Every validation error found in one pass.
#[derive(Debug)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Check a deserialized config for semantic errors.
pub fn validate_config(config: &DevServerConfig) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    for (index, rule) in config.server.proxy.iter().enumerate() {
        if rule.context.is_empty() {
            errors.push(ValidationError::EmptyContext {
                index,
                context: rule.context.clone(),
            });
            continue;
        }
        if let Err(source) = Route::compile(rule) {
            errors.push(ValidationError::Route {
                index,
                context: rule.context.clone(),
                source,
            });
        }
    }

    let base = &config.server.base;
    if base.contains(['?', '#']) || base.chars().any(char::is_whitespace) {
        errors.push(ValidationError::InvalidBase(base.clone()));
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(config.logging.level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}
