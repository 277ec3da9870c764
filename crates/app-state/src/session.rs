//! Playback session state machine
//!
//! One session exists at a time. It moves between idle, submitting, failed,
//! and playing as the user submits links and the embedded frame reports back.
//! [`SessionState::transition`] is a pure function of (state, event); any
//! side effect it needs is returned as a [`SessionCommand`] for the caller to
//! carry out.

use app_core::{ResolvedVideo, ValidationError};
use serde::Serialize;

use crate::embed::{EmbedLoadFailure, EmbedLoadState, EmbedSignal};

/// State of the active video while playing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayingState {
    video: ResolvedVideo,
    embed: EmbedLoadState,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<String>,
}

impl PlayingState {
    /// Start playing a video; the frame begins loading
    pub fn new(video: ResolvedVideo) -> Self {
        Self {
            video,
            embed: EmbedLoadState::Loading,
            notice: None,
        }
    }

    /// The video being played
    pub fn video(&self) -> &ResolvedVideo {
        &self.video
    }

    /// Load state of the embedded frame
    pub fn embed(&self) -> EmbedLoadState {
        self.embed
    }

    /// Session-level message raised by the frame, if any
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}

/// State of the playback session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum SessionState {
    /// Waiting for a link
    #[default]
    Idle,

    /// Resolving the given input
    Submitting {
        /// Input being resolved
        input: String,
    },

    /// Resolution failed
    Failed {
        /// Why the input was rejected
        #[serde(serialize_with = "serialize_reason")]
        error: ValidationError,
        /// The input exactly as submitted
        input: String,
    },

    /// A video is playing
    Playing(PlayingState),
}

fn serialize_reason<S: serde::Serializer>(
    error: &ValidationError,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Events that drive the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The user submitted a link
    Submit(String),
    /// Resolution of the submitted input finished
    Resolved(Result<ResolvedVideo, ValidationError>),
    /// The user asked to try the failed input again
    Retry,
    /// The user asked to start over
    Reset,
    /// The embedded frame reported, or the user acted on it
    Embed(EmbedSignal),
}

impl SessionEvent {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::Submit(_) => "submit",
            SessionEvent::Resolved(_) => "resolved",
            SessionEvent::Retry => "retry",
            SessionEvent::Reset => "reset",
            SessionEvent::Embed(EmbedSignal::Loaded) => "embed_loaded",
            SessionEvent::Embed(EmbedSignal::Failed) => "embed_failed",
            SessionEvent::Embed(EmbedSignal::Retry) => "embed_retry",
        }
    }
}

/// Work the caller must do after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Resolve this input and feed back [`SessionEvent::Resolved`]
    Resolve(String),
    /// Reload the embedded frame with this URL
    ReloadEmbed(String),
}

/// Outcome of applying an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The new state
    pub state: SessionState,
    /// Work requested by the transition
    pub command: Option<SessionCommand>,
}

impl Transition {
    fn to(state: SessionState) -> Self {
        Self {
            state,
            command: None,
        }
    }

    fn with(state: SessionState, command: SessionCommand) -> Self {
        Self {
            state,
            command: Some(command),
        }
    }
}

impl SessionState {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Submitting { .. } => "submitting",
            SessionState::Failed { .. } => "failed",
            SessionState::Playing(_) => "playing",
        }
    }

    /// Apply an event, returning the next state and any requested work
    ///
    /// Events that mean nothing in the current state leave it unchanged.
    pub fn transition(self, event: SessionEvent) -> Transition {
        match (self, event) {
            (_, SessionEvent::Submit(input)) => Transition::with(
                SessionState::Submitting {
                    input: input.clone(),
                },
                SessionCommand::Resolve(input),
            ),

            (_, SessionEvent::Reset) => Transition::to(SessionState::Idle),

            (SessionState::Failed { input, .. }, SessionEvent::Retry) => Transition::with(
                SessionState::Submitting {
                    input: input.clone(),
                },
                SessionCommand::Resolve(input),
            ),

            (SessionState::Submitting { .. }, SessionEvent::Resolved(Ok(video))) => {
                Transition::to(SessionState::Playing(PlayingState::new(video)))
            }

            (SessionState::Submitting { input }, SessionEvent::Resolved(Err(error))) => {
                Transition::to(SessionState::Failed { error, input })
            }

            (SessionState::Playing(mut playing), SessionEvent::Embed(signal)) => {
                playing.embed = playing.embed.apply(signal);
                match signal {
                    EmbedSignal::Loaded => {
                        playing.notice = None;
                        Transition::to(SessionState::Playing(playing))
                    }
                    EmbedSignal::Failed => {
                        playing.notice = Some(EmbedLoadFailure.to_string());
                        Transition::to(SessionState::Playing(playing))
                    }
                    EmbedSignal::Retry => {
                        playing.notice = None;
                        let url = playing.video.embed_url.clone();
                        Transition::with(
                            SessionState::Playing(playing),
                            SessionCommand::ReloadEmbed(url),
                        )
                    }
                }
            }

            (state, event) => {
                tracing::debug!(state = state.name(), event = event.name(), "Ignoring event");
                Transition::to(state)
            }
        }
    }

    /// Whether no link is active
    pub fn is_idle(&self) -> bool {
        matches!(self, SessionState::Idle)
    }

    /// Whether a video is playing
    pub fn is_playing(&self) -> bool {
        matches!(self, SessionState::Playing(_))
    }

    /// Whether the last submission failed
    pub fn is_failed(&self) -> bool {
        matches!(self, SessionState::Failed { .. })
    }

    /// Playing state, if a video is playing
    pub fn playing(&self) -> Option<&PlayingState> {
        match self {
            SessionState::Playing(playing) => Some(playing),
            _ => None,
        }
    }

    /// The video being played, if any
    pub fn video(&self) -> Option<&ResolvedVideo> {
        self.playing().map(PlayingState::video)
    }

    /// Load state of the embedded frame, if a video is playing
    pub fn embed(&self) -> Option<EmbedLoadState> {
        self.playing().map(PlayingState::embed)
    }

    /// Human-readable message to show for the current state, if any
    pub fn error_message(&self) -> Option<String> {
        match self {
            SessionState::Failed { error, .. } => Some(error.to_string()),
            SessionState::Playing(playing) => playing.notice.clone(),
            _ => None,
        }
    }

    /// The input that is being resolved or that last failed
    pub fn input(&self) -> Option<&str> {
        match self {
            SessionState::Submitting { input } | SessionState::Failed { input, .. } => {
                Some(input.as_str())
            }
            _ => None,
        }
    }
}
