use std::path::PathBuf;

use clap::Parser;

use dev_router::config::{load_or_default, CliOverrides, DEFAULT_CONFIG_FILE};
use dev_router::lifecycle::{self, signals, Shutdown};
use dev_router::observability::logging;

#[derive(Parser)]
#[command(name = "dev-router", version)]
#[command(about = "Development server that forwards API paths to a backend", long_about = None)]
struct Cli {
    /// Config file (defaults to ./dev-router.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: CliOverrides,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (mut config, source) = load_or_default(cli.config.as_deref())?;
    cli.overrides.apply(&mut config);

    logging::init(&config.logging.level);
    tracing::info!("dev-router v{} starting", env!("CARGO_PKG_VERSION"));
    match &source {
        Some(path) => tracing::info!(path = %path.display(), "Config file loaded"),
        None => tracing::warn!(
            path = DEFAULT_CONFIG_FILE,
            "Config file not found, using built-in defaults"
        ),
    }

    let shutdown = Shutdown::new();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        signal_shutdown.trigger();
    });

    if let Err(e) = lifecycle::start(config, &shutdown).await {
        tracing::error!(error = %e, "Startup failed");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
