//! Viewer configuration
//!
//! Configuration is a small JSON document. Every field has a default, so an
//! empty object (or no file at all) is a valid configuration.

use app_core::EmbedStrategy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::Level;

use crate::feedback::DEFAULT_COPY_FEEDBACK;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the file failed
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid configuration JSON
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of range
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Log levels accepted in configuration
///
/// Parsing ignores case and surrounding whitespace, and accepts `warning` for
/// [`LogLevel::Warn`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Warning and error messages
    Warn,
    /// Informational, warning, and error messages
    #[default]
    Info,
    /// Debug, informational, warning, and error messages
    Debug,
    /// All messages including detailed tracing
    Trace,
}

impl LogLevel {
    /// Convert to a tracing level
    pub fn as_tracing_level(self) -> Level {
        match self {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(format!("Invalid log level: {s}")),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, String> {
        value.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.to_string()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

/// Viewer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerConfig {
    /// How long the copied flag stays up, in milliseconds
    #[serde(default = "default_copy_feedback_ms")]
    pub copy_feedback_ms: u64,

    /// Template used to build embed URLs
    #[serde(default)]
    pub embed_strategy: EmbedStrategy,

    /// Log level used when `RUST_LOG` is not set
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_copy_feedback_ms() -> u64 {
    DEFAULT_COPY_FEEDBACK.as_millis() as u64
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            copy_feedback_ms: default_copy_feedback_ms(),
            embed_strategy: EmbedStrategy::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl ViewerConfig {
    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ViewerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path.as_ref()).await?;
        let config = Self::from_json(&contents)?;
        tracing::debug!(path = %path.as_ref().display(), "Loaded viewer config");
        Ok(config)
    }

    /// Load configuration from a file, falling back to defaults if it is missing
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        match Self::load(path).await {
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Check that values are in range
    pub fn validate(&self) -> Result<()> {
        if self.copy_feedback_ms == 0 {
            return Err(ConfigError::Invalid(
                "copyFeedbackMs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// How long the copied flag stays up
    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }
}
