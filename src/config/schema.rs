//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the dev server.
//! All types derive `Deserialize` for loading from config files.

use std::path::PathBuf;

use serde::Deserialize;

/// Root configuration for the dev server.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DevServerConfig {
    /// Listener, host check, proxy table and asset settings.
    pub server: ServerConfig,

    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen on every interface instead of loopback only.
    pub host: bool,

    /// TCP port to listen on. `0` lets the OS pick one.
    pub port: u16,

    /// Fail startup when the port is taken instead of trying the next one.
    pub strict_port: bool,

    /// Accepted `Host` header values.
    pub allowed_hosts: AllowedHosts,

    /// Ordered proxy table. First match wins.
    pub proxy: Vec<ProxyRule>,

    /// Directory local assets are served from.
    pub root: PathBuf,

    /// Public base path the assets are mounted under.
    pub base: String,

    /// Framework plugins. Opaque to the server, only reported at startup.
    pub plugins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: false,
            port: 5173,
            strict_port: false,
            allowed_hosts: AllowedHosts::default(),
            proxy: Vec::new(),
            root: PathBuf::from("."),
            base: "/".to_string(),
            plugins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Base path normalized for dev serving: always starts and ends with `/`.
    ///
    /// A relative base (`./` or empty) is served from the root.
    pub fn normalized_base(&self) -> String {
        let trimmed = self.base.trim();
        if trimmed.is_empty() || trimmed.starts_with('.') {
            return "/".to_string();
        }
        let mut base = String::with_capacity(trimmed.len() + 2);
        if !trimmed.starts_with('/') {
            base.push('/');
        }
        base.push_str(trimmed);
        if !base.ends_with('/') {
            base.push('/');
        }
        base
    }
}

/// `Host` header allow-list.
///
/// Either `true` (accept any host) or a list of hostnames. Entries starting
/// with `.` also accept every subdomain.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum AllowedHosts {
    Any(bool),
    List(Vec<String>),
}

impl Default for AllowedHosts {
    fn default() -> Self {
        AllowedHosts::List(Vec::new())
    }
}

/// A single proxy table entry.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ProxyRule {
    /// Literal path prefix, or a regular expression when it starts with `^`.
    pub context: String,

    /// Upstream base URL, e.g. `http://localhost:8080`.
    pub target: String,
}

impl ProxyRule {
    pub fn new(context: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            target: target.into(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
