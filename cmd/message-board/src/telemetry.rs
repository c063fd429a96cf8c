//! Tracing subscriber setup.

use anyhow::{anyhow, Result};
use configs::{LogFormat, LoggingSettings};
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init(settings: &LoggingSettings) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.level)
            .map_err(|e| anyhow!("invalid logging.level `{}`: {e}", settings.level))?,
    };

    let installed = match settings.format {
        LogFormat::Json => fmt()
            .with_env_filter(filter)
            .json()
            .with_current_span(false)
            .try_init(),
        LogFormat::Pretty => fmt().with_env_filter(filter).with_target(true).try_init(),
    };
    installed.map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}
