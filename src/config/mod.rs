//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → CLI overrides applied by main
//!     → DevServerConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no runtime reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod overrides;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, parse_config, ConfigError, DEFAULT_CONFIG_FILE};
pub use overrides::CliOverrides;
pub use schema::{AllowedHosts, DevServerConfig, LoggingConfig, ProxyRule, ServerConfig};
pub use validation::{validate_config, ValidationError, ValidationErrors};
