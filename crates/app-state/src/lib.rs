//! Session state for Terabox Viewer
//!
//! This crate holds the playback session state machine, the embedded frame
//! lifecycle nested inside it, the transient copied flag, configuration, and
//! the controller that presentation code drives.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod controller;
pub mod embed;
pub mod feedback;
pub mod session;

pub use config::{ConfigError, LogLevel, ViewerConfig};
pub use controller::{ControlError, PlaybackController};
pub use embed::{EmbedLoadFailure, EmbedLoadState, EmbedSignal};
pub use feedback::{CopyFeedback, DEFAULT_COPY_FEEDBACK};
pub use session::{PlayingState, SessionCommand, SessionEvent, SessionState, Transition};
