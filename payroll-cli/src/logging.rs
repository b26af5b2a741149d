use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Initializes logging to stderr. Tables and prompts own stdout, so log
/// lines stay out of the way. `RUST_LOG` wins over the `--log` flag when
/// both are set.
pub fn init(directive: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(directive))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))?;
    Ok(())
}
