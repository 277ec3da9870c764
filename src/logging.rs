//! Tracing setup
//!
//! Console output filtered by `RUST_LOG` when it is set, otherwise by the
//! configured level.

use anyhow::anyhow;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

pub use app_state::LogLevel;

/// Build the filter for `level`, letting `RUST_LOG` directives override it
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level.as_tracing_level()).into())
        .from_env_lossy()
}

/// Install the global tracing subscriber
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(level: LogLevel) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize tracing: {e}"))?;

    tracing::debug!(%level, "Tracing initialized");
    Ok(())
}
