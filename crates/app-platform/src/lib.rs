//! Platform primitives for Terabox Viewer
//!
//! This crate wraps the platform features the viewer consumes: writing text
//! to the system clipboard and opening links in the default browser, with
//! per-platform command tables for Windows, macOS, and Linux.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clipboard;
pub mod launcher;

// Every table is compiled everywhere so each one can be tested on any host.
#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
mod windows;
#[cfg(target_os = "windows")]
use self::windows as native;

#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
mod macos;
#[cfg(target_os = "macos")]
use self::macos as native;

#[cfg_attr(any(target_os = "windows", target_os = "macos"), allow(dead_code))]
mod linux;
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
use self::linux as native;

pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard, SystemClipboard};
pub use launcher::{ensure_web_url, LaunchError, Launcher, RecordingLauncher, SystemLauncher};

/// A program invocation used to reach a platform feature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeCommand {
    /// Program name, resolved through `PATH`
    pub program: &'static str,
    /// Arguments passed before any caller-supplied argument
    pub args: &'static [&'static str],
}

impl NativeCommand {
    /// Build a process for this invocation with no caller arguments yet
    pub fn to_command(&self) -> tokio::process::Command {
        let mut command = tokio::process::Command::new(self.program);
        command.args(self.args);
        command
    }
}
