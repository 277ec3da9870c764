//! Opening links outside the viewer

use async_trait::async_trait;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use tokio::sync::Mutex;

use crate::{native, NativeCommand};

/// Launch errors
#[derive(Debug, Error)]
pub enum LaunchError {
    /// Only http and https links are opened
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    /// I/O error while starting the browser
    #[error("Launch I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The launcher exited unsuccessfully
    #[error("Launch failed: {0}")]
    Failed(String),
}

/// Result type for launch operations
pub type Result<T> = std::result::Result<T, LaunchError>;

/// Opens a URL in a new top-level browsing context
#[async_trait]
pub trait Launcher: Send + Sync {
    /// Open `url`
    async fn open(&self, url: &str) -> Result<()>;
}

/// Check that a URL is safe to hand to the system launcher
pub fn ensure_web_url(url: &str) -> Result<&str> {
    let url = url.trim();
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        Ok(url)
    } else {
        Err(LaunchError::UnsupportedScheme(url.to_string()))
    }
}

/// Opens links with the platform's default browser
#[derive(Debug, Clone)]
pub struct SystemLauncher {
    command: NativeCommand,
}

impl SystemLauncher {
    /// Create a launcher using the platform's open command
    pub fn new() -> Self {
        Self {
            command: native::OPEN_COMMAND,
        }
    }

    /// Create a launcher using a specific command
    pub fn with_command(command: NativeCommand) -> Self {
        Self { command }
    }

    /// Build the process that opens `url`, which is passed as a single argument
    fn command(&self, url: &str) -> Command {
        let mut command = self.command.to_command();
        command
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }
}

impl Default for SystemLauncher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Launcher for SystemLauncher {
    async fn open(&self, url: &str) -> Result<()> {
        let url = ensure_web_url(url)?;

        let status = self.command(url).status().await?;
        if status.success() {
            Ok(())
        } else {
            tracing::warn!(program = self.command.program, %status, "Launcher failed");
            Err(LaunchError::Failed(format!(
                "{} exited with {}",
                self.command.program, status
            )))
        }
    }
}

/// Launcher that records the links it was asked to open
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    opened: Mutex<Vec<String>>,
}

impl RecordingLauncher {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Links opened so far, oldest first
    pub async fn opened(&self) -> Vec<String> {
        self.opened.lock().await.clone()
    }
}

#[async_trait]
impl Launcher for RecordingLauncher {
    async fn open(&self, url: &str) -> Result<()> {
        self.opened.lock().await.push(url.to_string());
        Ok(())
    }
}
