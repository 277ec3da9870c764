//! Terabox Viewer
//!
//! Paste a TeraBox sharing link, get an embeddable video and a small session
//! state machine to drive the player around it.
//!
//! # Crates
//!
//! - [`app_core`] - Link resolver and embed strategies
//! - [`app_state`] - Session state machine, copied flag, configuration, controller
//! - [`app_platform`] - Clipboard and browser access
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use terabox_viewer::{
//!     EmbedLoadState, MemoryClipboard, PlaybackController, RecordingLauncher, ViewerConfig,
//! };
//!
//! let mut controller = PlaybackController::from_config(
//!     &ViewerConfig::default(),
//!     Arc::new(MemoryClipboard::new()),
//!     Arc::new(RecordingLauncher::new()),
//! );
//!
//! controller.submit("https://terabox.com/s/AbC123");
//! assert_eq!(controller.embed_state(), Some(EmbedLoadState::Loading));
//!
//! controller.embed_failed();
//! assert!(controller.state().is_playing());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod logging;

use anyhow::Context;
use std::path::Path;

pub use app_core::{
    resolve, supported_formats, EmbedStrategy, LinkResolver, ResolvedVideo, TeraboxResolver,
    ValidationError,
};
pub use app_platform::{
    Clipboard, ClipboardError, LaunchError, Launcher, MemoryClipboard, RecordingLauncher,
    SystemClipboard, SystemLauncher,
};
pub use app_state::{
    ControlError, CopyFeedback, EmbedLoadFailure, EmbedLoadState, PlaybackController,
    SessionEvent, SessionState, ViewerConfig,
};
pub use logging::{init_tracing, LogLevel};

/// Load configuration, install tracing, and build a controller on the
/// system clipboard and browser
///
/// A missing configuration file means defaults. The global subscriber is
/// installed by the first call; later calls keep it and still return a new
/// controller.
pub async fn start(config_path: impl AsRef<Path>) -> anyhow::Result<PlaybackController> {
    let config = ViewerConfig::load_or_default(config_path.as_ref())
        .await
        .with_context(|| format!("loading {}", config_path.as_ref().display()))?;

    if let Err(error) = init_tracing(config.log_level) {
        tracing::debug!(%error, "Keeping the installed tracing subscriber");
    }

    tracing::info!(strategy = config.embed_strategy.as_str(), "Viewer ready");
    Ok(PlaybackController::system(&config))
}
