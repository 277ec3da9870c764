//! Transient "copied" feedback
//!
//! After a successful copy the flag reads true until its deadline passes on
//! the tokio clock. Nothing has to fire for it to go back to false, and a new
//! copy replaces the previous deadline.

use std::time::Duration;
use tokio::time::Instant;

/// How long the copied flag stays up by default
pub const DEFAULT_COPY_FEEDBACK: Duration = Duration::from_secs(2);

/// Timed flag shown after copying
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyFeedback {
    duration: Duration,
    shown_until: Option<Instant>,
}

impl CopyFeedback {
    /// Create a flag that stays up for `duration` after each copy
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            shown_until: None,
        }
    }

    /// How long the flag stays up
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Raise the flag, superseding any earlier deadline
    pub fn mark_copied(&mut self) {
        self.shown_until = Some(Instant::now() + self.duration);
    }

    /// Lower the flag immediately
    pub fn clear(&mut self) {
        self.shown_until = None;
    }

    /// Whether the flag is up
    pub fn is_copied(&self) -> bool {
        self.remaining().is_some()
    }

    /// Time until the flag goes down, if it is up
    pub fn remaining(&self) -> Option<Duration> {
        let deadline = self.shown_until?;
        let remaining = deadline.saturating_duration_since(Instant::now());
        (!remaining.is_zero()).then_some(remaining)
    }

    /// Wait until the flag goes down
    pub async fn expired(&self) {
        if let Some(deadline) = self.shown_until {
            tokio::time::sleep_until(deadline).await;
        }
    }
}

impl Default for CopyFeedback {
    fn default() -> Self {
        Self::new(DEFAULT_COPY_FEEDBACK)
    }
}
