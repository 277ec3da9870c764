//! Embedded frame lifecycle
//!
//! The frame reports load success or failure on its own schedule; these types
//! track what it last reported while a video is playing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Load state of the embedded frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmbedLoadState {
    /// Waiting for the frame to report
    #[default]
    Loading,
    /// The frame loaded
    Loaded,
    /// The frame reported an error
    LoadFailed,
}

impl EmbedLoadState {
    /// Whether the frame is still loading
    pub fn is_loading(&self) -> bool {
        matches!(self, EmbedLoadState::Loading)
    }

    /// Whether the frame reported an error
    pub fn is_failed(&self) -> bool {
        matches!(self, EmbedLoadState::LoadFailed)
    }
}

/// Signals coming from the embedded frame, or the user acting on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedSignal {
    /// The frame finished loading
    Loaded,
    /// The frame failed to load
    Failed,
    /// The user asked to load the frame again
    Retry,
}

impl EmbedLoadState {
    /// Apply a signal to the current state
    ///
    /// A retry always restarts loading, even from `Loaded`.
    pub fn apply(self, signal: EmbedSignal) -> EmbedLoadState {
        match signal {
            EmbedSignal::Loaded => EmbedLoadState::Loaded,
            EmbedSignal::Failed => EmbedLoadState::LoadFailed,
            EmbedSignal::Retry => EmbedLoadState::Loading,
        }
    }
}

/// The embedded frame could not show the video
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Error)]
#[error("Failed to load video. The video might be private, expired, or not embeddable.")]
pub struct EmbedLoadFailure;

impl EmbedLoadFailure {
    /// Usual reasons a TeraBox video refuses to embed
    pub fn likely_causes() -> &'static [&'static str] {
        &[
            "Video privacy settings",
            "Expired sharing link",
            "CORS restrictions",
            "TeraBox embedding limitations",
        ]
    }
}
