//! Playback session controller
//!
//! The controller owns the single active session. Presentation code calls its
//! action methods and reads state back; platform work (clipboard, browser) is
//! delegated to the injected [`Clipboard`] and [`Launcher`].

use app_core::{LinkResolver, ResolvedVideo, TeraboxResolver};
use app_platform::{
    Clipboard, ClipboardError, LaunchError, Launcher, SystemClipboard, SystemLauncher,
};
use std::sync::Arc;
use thiserror::Error;

use crate::config::ViewerConfig;
use crate::embed::{EmbedLoadState, EmbedSignal};
use crate::feedback::CopyFeedback;
use crate::session::{SessionCommand, SessionEvent, SessionState};

/// Errors from controller actions
#[derive(Debug, Error)]
pub enum ControlError {
    /// The action needs a playing video
    #[error("No video is playing")]
    NoActiveVideo,

    /// Clipboard error
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    /// Launcher error
    #[error("Launch error: {0}")]
    Launch(#[from] LaunchError),
}

/// Result type for controller actions
pub type Result<T> = std::result::Result<T, ControlError>;

/// Drives one playback session
pub struct PlaybackController<R = TeraboxResolver> {
    resolver: R,
    clipboard: Arc<dyn Clipboard>,
    launcher: Arc<dyn Launcher>,
    state: SessionState,
    copied: CopyFeedback,
}

impl PlaybackController<TeraboxResolver> {
    /// Create a controller from configuration
    pub fn from_config(
        config: &ViewerConfig,
        clipboard: Arc<dyn Clipboard>,
        launcher: Arc<dyn Launcher>,
    ) -> Self {
        let resolver = TeraboxResolver::with_strategy(config.embed_strategy);
        Self::new(resolver, clipboard, launcher).with_copy_feedback(config.copy_feedback())
    }

    /// Create a controller using the system clipboard and browser
    pub fn system(config: &ViewerConfig) -> Self {
        Self::from_config(
            config,
            Arc::new(SystemClipboard::new()),
            Arc::new(SystemLauncher::new()),
        )
    }
}

impl<R: LinkResolver> PlaybackController<R> {
    /// Create a controller
    pub fn new(resolver: R, clipboard: Arc<dyn Clipboard>, launcher: Arc<dyn Launcher>) -> Self {
        Self {
            resolver,
            clipboard,
            launcher,
            state: SessionState::Idle,
            copied: CopyFeedback::default(),
        }
    }

    /// Set how long the copied flag stays up
    pub fn with_copy_feedback(mut self, duration: std::time::Duration) -> Self {
        self.copied = CopyFeedback::new(duration);
        self
    }

    /// Current session state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Load state of the embedded frame, if a video is playing
    pub fn embed_state(&self) -> Option<EmbedLoadState> {
        self.state.embed()
    }

    /// The video being played, if any
    pub fn video(&self) -> Option<&ResolvedVideo> {
        self.state.video()
    }

    /// Message to show for the current state, if any
    pub fn error_message(&self) -> Option<String> {
        self.state.error_message()
    }

    /// Whether the copied flag is up
    pub fn is_copied(&self) -> bool {
        self.copied.is_copied()
    }

    /// The copied flag
    pub fn copy_feedback(&self) -> &CopyFeedback {
        &self.copied
    }

    /// Apply an event and carry out any follow-up work
    ///
    /// Returns the URL the embedded frame must reload, if the event asked for
    /// a reload.
    pub fn dispatch(&mut self, event: SessionEvent) -> Option<String> {
        let mut event = event;
        loop {
            let from = self.state.name();
            let name = event.name();
            let transition = std::mem::take(&mut self.state).transition(event);
            self.state = transition.state;
            tracing::debug!(from, to = self.state.name(), event = name, "Session transition");

            match transition.command {
                None => return None,
                Some(SessionCommand::Resolve(input)) => {
                    event = SessionEvent::Resolved(self.resolver.resolve(&input));
                }
                Some(SessionCommand::ReloadEmbed(url)) => return Some(url),
            }
        }
    }

    /// Submit a link
    pub fn submit(&mut self, raw: impl Into<String>) -> &SessionState {
        self.copied.clear();
        self.dispatch(SessionEvent::Submit(raw.into()));
        match &self.state {
            SessionState::Playing(playing) => {
                tracing::info!(token = %playing.video().token, "Playing video");
            }
            SessionState::Failed { error, .. } => {
                tracing::info!(%error, "Rejected link");
            }
            _ => {}
        }
        &self.state
    }

    /// Resolve the failed input again
    pub fn retry(&mut self) -> &SessionState {
        self.dispatch(SessionEvent::Retry);
        &self.state
    }

    /// Drop the current video or error and return to idle
    pub fn reset(&mut self) {
        self.copied.clear();
        self.dispatch(SessionEvent::Reset);
        tracing::info!("Session reset");
    }

    /// The embedded frame finished loading
    pub fn embed_loaded(&mut self) {
        self.dispatch(SessionEvent::Embed(EmbedSignal::Loaded));
    }

    /// The embedded frame failed to load
    pub fn embed_failed(&mut self) {
        if let Some(video) = self.state.video() {
            tracing::warn!(embed_url = %video.embed_url, "Embedded frame failed to load");
        }
        self.dispatch(SessionEvent::Embed(EmbedSignal::Failed));
    }

    /// Load the embedded frame again
    ///
    /// Returns the URL the frame must reload; it is always the same embed URL.
    pub fn retry_embed(&mut self) -> Option<String> {
        self.dispatch(SessionEvent::Embed(EmbedSignal::Retry))
    }

    /// Copy the playing video's link to the clipboard
    ///
    /// A failed write is logged and returned; the session is left as it was.
    pub async fn copy_direct_url(&mut self) -> Result<()> {
        let text = self.video().ok_or(ControlError::NoActiveVideo)?.direct_url.clone();

        match self.clipboard.write_text(&text).await {
            Ok(()) => {
                self.copied.mark_copied();
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to copy URL: {}", e);
                Err(e.into())
            }
        }
    }

    /// Open the playing video's original link in the browser
    pub async fn open_direct_url(&self) -> Result<()> {
        let url = &self.video().ok_or(ControlError::NoActiveVideo)?.direct_url;
        self.open(url).await
    }

    /// Open the playing video's embed URL in the browser
    pub async fn open_embed_url(&self) -> Result<()> {
        let url = &self.video().ok_or(ControlError::NoActiveVideo)?.embed_url;
        self.open(url).await
    }

    async fn open(&self, url: &str) -> Result<()> {
        self.launcher.open(url).await.map_err(|e| {
            tracing::warn!(url, "Failed to open link: {}", e);
            ControlError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_core::ValidationError;
    use app_platform::{MemoryClipboard, RecordingLauncher};
    use async_trait::async_trait;
    use mockall::mock;
    use std::time::Duration;

    mock! {
        pub Resolver {}
        impl LinkResolver for Resolver {
            fn resolve(&self, raw: &str) -> app_core::resolver::Result<ResolvedVideo>;
        }
    }

    mock! {
        pub Board {}
        #[async_trait]
        impl Clipboard for Board {
            async fn write_text(&self, text: &str) -> app_platform::clipboard::Result<()>;
        }
    }

    const LINK: &str = "https://terabox.com/s/AbC123";

    fn controller() -> (PlaybackController, Arc<MemoryClipboard>, Arc<RecordingLauncher>) {
        let clipboard = Arc::new(MemoryClipboard::new());
        let launcher = Arc::new(RecordingLauncher::new());
        let controller = PlaybackController::from_config(
            &ViewerConfig::default(),
            clipboard.clone(),
            launcher.clone(),
        );
        (controller, clipboard, launcher)
    }

    #[test]
    fn test_starts_idle() {
        let (controller, _, _) = controller();
        assert!(controller.state().is_idle());
        assert_eq!(controller.embed_state(), None);
        assert!(!controller.is_copied());
    }

    #[test]
    fn test_submit_valid_link() {
        let (mut controller, _, _) = controller();
        let state = controller.submit(LINK);
        assert!(state.is_playing());
        assert_eq!(controller.embed_state(), Some(EmbedLoadState::Loading));
        assert_eq!(controller.video().unwrap().title, "TeraBox Video - AbC123");
    }

    #[test]
    fn test_submit_empty_input() {
        let (mut controller, _, _) = controller();
        controller.submit("   ");
        assert_eq!(
            controller.state(),
            &SessionState::Failed {
                error: ValidationError::EmptyInput,
                input: "   ".to_string(),
            }
        );
        assert_eq!(controller.error_message().as_deref(), Some("Please enter a TeraBox URL"));
    }

    #[test]
    fn test_retry_resolves_exact_input_again() {
        let mut resolver = MockResolver::new();
        resolver
            .expect_resolve()
            .withf(|raw| raw == "  https://terabox.com/s/ok \n")
            .times(1)
            .returning(|_| Err(ValidationError::UnrecognizedFormat));
        resolver
            .expect_resolve()
            .withf(|raw| raw == "  https://terabox.com/s/ok \n")
            .times(1)
            .returning(|raw| app_core::resolve(raw));

        let mut controller = PlaybackController::new(
            resolver,
            Arc::new(MemoryClipboard::new()),
            Arc::new(RecordingLauncher::new()),
        );

        controller.submit("  https://terabox.com/s/ok \n");
        assert!(controller.state().is_failed());

        controller.retry();
        assert!(controller.state().is_playing());
        assert_eq!(controller.video().unwrap().direct_url, "  https://terabox.com/s/ok \n");
    }

    #[test]
    fn test_retry_when_idle_does_not_resolve() {
        let mut resolver = MockResolver::new();
        resolver.expect_resolve().times(0);

        let mut controller = PlaybackController::new(
            resolver,
            Arc::new(MemoryClipboard::new()),
            Arc::new(RecordingLauncher::new()),
        );
        controller.retry();
        assert!(controller.state().is_idle());
    }

    #[test]
    fn test_embed_failure_keeps_playing() {
        let (mut controller, _, _) = controller();
        controller.submit(LINK);
        controller.embed_failed();

        assert!(controller.state().is_playing());
        assert_eq!(controller.embed_state(), Some(EmbedLoadState::LoadFailed));
        assert!(controller.error_message().unwrap().contains("not embeddable"));
    }

    #[test]
    fn test_retry_embed_returns_same_url() {
        let (mut controller, _, _) = controller();
        controller.submit(LINK);
        controller.embed_failed();

        let reload = controller.retry_embed();
        assert_eq!(reload.as_deref(), Some("https://terabox.com/sharing/embed?surl=AbC123"));
        assert_eq!(controller.embed_state(), Some(EmbedLoadState::Loading));

        controller.embed_loaded();
        assert_eq!(controller.embed_state(), Some(EmbedLoadState::Loaded));
        assert_eq!(controller.error_message(), None);
    }

    #[test]
    fn test_retry_embed_when_idle() {
        let (mut controller, _, _) = controller();
        assert_eq!(controller.retry_embed(), None);
        assert!(controller.state().is_idle());
    }

    #[test]
    fn test_reset_discards_video() {
        let (mut controller, _, _) = controller();
        controller.submit(LINK);
        controller.reset();
        assert!(controller.state().is_idle());
        assert!(controller.video().is_none());
        assert_eq!(controller.embed_state(), None);
    }

    #[test]
    fn test_strategy_from_config() {
        let config = ViewerConfig {
            embed_strategy: app_core::EmbedStrategy::PathEmbed,
            ..ViewerConfig::default()
        };
        let mut controller = PlaybackController::from_config(
            &config,
            Arc::new(MemoryClipboard::new()),
            Arc::new(RecordingLauncher::new()),
        );
        controller.submit(LINK);
        assert_eq!(controller.video().unwrap().embed_url, "https://terabox.com/embed/AbC123");
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_sets_flag_until_delay() {
        let (mut controller, clipboard, _) = controller();
        controller.submit(LINK);

        controller.copy_direct_url().await.unwrap();
        assert!(controller.is_copied());
        assert_eq!(clipboard.contents().await.as_deref(), Some(LINK));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(!controller.is_copied());
        assert!(controller.state().is_playing());
    }

    #[tokio::test]
    async fn test_copy_without_video() {
        let (mut controller, clipboard, _) = controller();
        let result = controller.copy_direct_url().await;
        assert!(matches!(result, Err(ControlError::NoActiveVideo)));
        assert_eq!(clipboard.contents().await, None);
    }

    #[tokio::test]
    async fn test_copy_failure_leaves_session_alone() {
        let mut board = MockBoard::new();
        board
            .expect_write_text()
            .times(1)
            .returning(|_| Err(ClipboardError::Rejected("permission denied".to_string())));

        let mut controller = PlaybackController::new(
            TeraboxResolver::new(),
            Arc::new(board),
            Arc::new(RecordingLauncher::new()),
        );
        controller.submit(LINK);
        let before = controller.state().clone();

        let result = controller.copy_direct_url().await;
        assert!(matches!(result, Err(ControlError::Clipboard(_))));
        assert!(!controller.is_copied());
        assert_eq!(controller.state(), &before);
    }

    #[tokio::test]
    async fn test_open_links() {
        let (mut controller, _, launcher) = controller();
        let raw = " https://terabox.com/s/AbC123";
        controller.submit(raw);

        controller.open_direct_url().await.unwrap();
        controller.open_embed_url().await.unwrap();

        assert_eq!(
            launcher.opened().await,
            vec![
                raw.to_string(),
                "https://terabox.com/sharing/embed?surl=AbC123".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_open_without_video() {
        let (controller, _, launcher) = controller();
        assert!(matches!(controller.open_direct_url().await, Err(ControlError::NoActiveVideo)));
        assert!(launcher.opened().await.is_empty());
    }
}
