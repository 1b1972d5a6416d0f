//! Command-line overrides layered on top of the config file.

use std::path::PathBuf;

use clap::Args;

use crate::config::schema::DevServerConfig;

/// Server flags that take precedence over the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct CliOverrides {
    /// Listen on all interfaces
    #[arg(long)]
    pub host: bool,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Exit if the port is already in use
    #[arg(long)]
    pub strict_port: bool,

    /// Directory to serve local assets from
    #[arg(long)]
    pub root: Option<PathBuf>,
}

impl CliOverrides {
    /// Apply the flags that were given. Boolean flags can only switch on.
    pub fn apply(&self, config: &mut DevServerConfig) {
        if self.host {
            config.server.host = true;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.strict_port {
            config.server.strict_port = true;
        }
        if let Some(root) = &self.root {
            config.server.root = root.clone();
        }
    }
}
