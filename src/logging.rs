//! Diagnostic logging to stderr; program output never goes through here.

use anyhow::{anyhow, Result};
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter directives come from `TIAS_LOG` when set, else from the verbosity flag.
pub fn init_logging(verbose: bool, color: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let env_filter = match std::env::var("TIAS_LOG") {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives)?,
        _ => EnvFilter::new(format!("tias={level}")),
    };

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(color)
        .with_target(verbose)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {e}"))
}
