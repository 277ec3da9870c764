//! Clipboard access
//!
//! Writing to the clipboard may be asynchronous and may be refused by the
//! platform, so every write reports its own outcome.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::process::Stdio;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::{native, NativeCommand};

/// Clipboard errors
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// No clipboard tool is available on this system
    #[error("No clipboard is available")]
    Unavailable,

    /// I/O error while talking to the clipboard tool
    #[error("Clipboard I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The clipboard tool refused the write
    #[error("Clipboard write rejected: {0}")]
    Rejected(String),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Write access to a clipboard
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents with `text`
    async fn write_text(&self, text: &str) -> Result<()>;
}

/// The system clipboard, reached through the platform's clipboard tool
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    commands: &'static [NativeCommand],
}

impl SystemClipboard {
    /// Create a clipboard using the platform's tools
    pub fn new() -> Self {
        Self {
            commands: native::CLIPBOARD_COMMANDS,
        }
    }

    /// Create a clipboard using specific tools, tried in order
    pub fn with_commands(commands: &'static [NativeCommand]) -> Self {
        Self { commands }
    }

    async fn write_with(command: &NativeCommand, text: &str) -> Result<()> {
        let mut child = command
            .to_command()
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        // A tool that exits without reading closes the pipe; its exit status
        // explains the failure better than the broken pipe does.
        let written = match child.stdin.take() {
            Some(mut stdin) => match stdin.write_all(text.as_bytes()).await {
                Ok(()) => stdin.shutdown().await,
                Err(e) => Err(e),
            },
            None => Ok(()),
        };

        let status = child.wait().await?;
        if !status.success() {
            tracing::warn!(program = command.program, %status, "Clipboard tool failed");
            return Err(ClipboardError::Rejected(format!(
                "{} exited with {}",
                command.program, status
            )));
        }
        written?;
        Ok(())
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        for command in self.commands {
            match Self::write_with(command, text).await {
                Err(ClipboardError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                    tracing::debug!(program = command.program, "Clipboard tool not installed");
                    continue;
                }
                result => return result,
            }
        }
        Err(ClipboardError::Unavailable)
    }
}

/// In-memory clipboard
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    /// Create an empty clipboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents
    pub async fn contents(&self) -> Option<String> {
        self.contents.lock().await.clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        *self.contents.lock().await = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISSING: &[NativeCommand] = &[
        NativeCommand {
            program: "terabox-viewer-no-such-clipboard-a",
            args: &[],
        },
        NativeCommand {
            program: "terabox-viewer-no-such-clipboard-b",
            args: &[],
        },
    ];

    #[tokio::test]
    async fn test_memory_clipboard_starts_empty() {
        let clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.contents().await, None);
    }

    #[tokio::test]
    async fn test_memory_clipboard_write() {
        let clipboard = MemoryClipboard::new();
        clipboard.write_text("first").await.unwrap();
        clipboard.write_text("second").await.unwrap();
        assert_eq!(clipboard.contents().await.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_system_clipboard_without_tools() {
        let clipboard = SystemClipboard::with_commands(MISSING);
        let result = clipboard.write_text("hello").await;
        assert!(matches!(result, Err(ClipboardError::Unavailable)));
    }

    /// A `sh` invocation that copies its stdin into `path`
    #[cfg(unix)]
    fn capture_into(path: &std::path::Path) -> &'static [NativeCommand] {
        let script = format!("cat > '{}'", path.display());
        let script: &'static str = Box::leak(script.into_boxed_str());
        let args: &'static [&'static str] = Box::leak(vec!["-c", script].into_boxed_slice());
        let command = NativeCommand {
            program: "sh",
            args,
        };
        Box::leak(vec![command].into_boxed_slice())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_clipboard_pipes_text_to_stdin() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("clipboard.txt");
        let clipboard = SystemClipboard::with_commands(capture_into(&path));

        let text = "https://terabox.com/s/AbC123?x=1&y=2";
        clipboard.write_text(text).await.unwrap();
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), text);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_clipboard_falls_through_missing_tools() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("clipboard.txt");
        let commands: Vec<NativeCommand> = MISSING
            .iter()
            .chain(capture_into(&path))
            .copied()
            .collect();
        let clipboard = SystemClipboard::with_commands(Box::leak(commands.into_boxed_slice()));

        clipboard.write_text("hello").await.unwrap();
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "hello");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_clipboard_rejected_by_tool() {
        const REFUSING: &[NativeCommand] = &[NativeCommand {
            program: "false",
            args: &[],
        }];
        let clipboard = SystemClipboard::with_commands(REFUSING);
        let result = clipboard.write_text("hello").await;
        match result {
            Err(ClipboardError::Rejected(message)) => {
                assert!(message.starts_with("false exited"))
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_error_display() {
        assert_eq!(ClipboardError::Unavailable.to_string(), "No clipboard is available");
        let error = ClipboardError::Rejected("denied".to_string());
        assert!(error.to_string().contains("denied"));
    }
}
