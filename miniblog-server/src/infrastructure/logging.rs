use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// RUST_LOG wins over the configured default level.
pub fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .compact()
        .with_target(true)
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow!("failed to init logging: {err}"))?;

    Ok(())
}
