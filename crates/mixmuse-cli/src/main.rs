mod commands;

use clap::Parser;
use commands::Cli;
use mixmuse_core::{ConfigManager, LoggingConfig};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let manager = match &cli.config {
        Some(path) => ConfigManager::from_file(path).await?,
        None => ConfigManager::auto_discover().await?,
    };

    init_tracing(&manager.get_config().await.logging, cli.verbose)?;

    commands::run(cli.command, cli.format, &manager).await
}

/// Logs go to stderr; `RUST_LOG` overrides the configured level
fn init_tracing(logging: &LoggingConfig, verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry.with(fmt::layer().json().with_writer(std::io::stderr)).try_init()?;
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).try_init()?;
    }

    Ok(())
}
