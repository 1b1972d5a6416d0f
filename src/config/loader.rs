//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::DevServerConfig;
use crate::config::validation::{validate_config, ValidationErrors};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "dev-router.toml";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<DevServerConfig, ConfigError> {
    let config: DevServerConfig = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<DevServerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Load an explicitly requested file, or fall back to the default file.
///
/// An explicit path must exist. The default file is optional; when it is
/// absent the built-in defaults are used. Returns the file actually read,
/// `None` meaning defaults.
pub fn load_or_default(
    explicit: Option<&Path>,
) -> Result<(DevServerConfig, Option<PathBuf>), ConfigError> {
    if let Some(path) = explicit {
        return Ok((load_config(path)?, Some(path.to_path_buf())));
    }

    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        Ok((load_config(default_path)?, Some(default_path.to_path_buf())))
    } else {
        Ok((DevServerConfig::default(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{AllowedHosts, ProxyRule};

    #[test]
    fn shipped_config_matches_project_setup() {
        let config = parse_config(include_str!("../../dev-router.toml")).unwrap();

        assert!(config.server.host);
        assert_eq!(config.server.port, 5173);
        assert!(config.server.strict_port);
        assert_eq!(
            config.server.allowed_hosts,
            AllowedHosts::List(vec![".".to_string()])
        );
        assert_eq!(
            config.server.proxy,
            vec![
                ProxyRule::new("/clientid", "http://localhost:8080"),
                ProxyRule::new("/orders", "http://localhost:8080"),
                ProxyRule::new("^/capture/.+", "http://localhost:8080"),
            ]
        );
        assert_eq!(config.server.plugins, vec!["react".to_string()]);
        assert_eq!(config.server.normalized_base(), "/");
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert!(!config.server.host);
        assert!(!config.server.strict_port);
        assert!(config.server.proxy.is_empty());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn invalid_rule_fails_validation() {
        let err = parse_config(
            r#"
            [[server.proxy]]
            context = "^/capture/("
            target = "http://localhost:8080"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_or_default(Some(Path::new("/nonexistent/dev-router.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
