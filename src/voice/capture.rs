//! Speech capture session control
//!
//! The platform recognition engine lives behind [`CaptureEngine`]; this
//! module owns the session lifecycle around it:
//!
//! ```text
//! Idle --toggle--> Starting --Ready--> Listening --toggle|Ended|Error--> Idle
//! ```
//!
//! Engine callbacks are modeled as [`CaptureEvent`]s delivered over an mpsc
//! channel so ordering and teardown stay explicit.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::{Error, Result};

/// Default recognition locale
pub const DEFAULT_LOCALE: &str = "en-US";

/// Parameters for one capture session
#[derive(Debug, Clone)]
pub struct SessionParams {
    /// Recognition locale (single fixed locale per session)
    pub locale: String,
    /// Whether the engine keeps listening after a final result
    pub continuous: bool,
    /// Whether the engine emits interim (revisable) transcripts
    pub interim_results: bool,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            continuous: false,
            interim_results: true,
        }
    }
}

impl SessionParams {
    /// Session parameters for the given locale, discrete with interim results
    #[must_use]
    pub fn for_locale(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            ..Self::default()
        }
    }
}

/// Events emitted by a capture session, in platform order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    /// The engine accepted the session and is listening
    Ready,
    /// Best-effort partial transcript; REPLACES any previous interim text
    Interim(String),
    /// Finalized utterance text (all final segments since session start)
    Final(String),
    /// The engine reported a recognition failure; the session is over
    Error(String),
    /// The session terminated naturally (e.g. silence timeout)
    Ended,
}

/// State of the capture session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    /// No session
    Idle,
    /// Session requested, engine not yet ready
    Starting,
    /// Engine is listening
    Listening,
}

/// Platform speech-to-text capability
///
/// Implementations wrap whatever recognition engine the host provides.
/// `start` hands back the event channel for the session; dropping the
/// sender ends the stream.
#[async_trait]
pub trait CaptureEngine: Send {
    /// Whether the platform can recognize speech at all
    fn is_supported(&self) -> bool;

    /// Begin a recognition session
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot start a session.
    async fn start(&mut self, params: SessionParams) -> Result<mpsc::Receiver<CaptureEvent>>;

    /// Request that the current session stop
    ///
    /// # Errors
    ///
    /// Returns an error if the stop request fails.
    async fn stop(&mut self) -> Result<()>;
}

/// A capture engine for hosts without speech recognition
///
/// `is_supported` is false, so the controller never starts a session;
/// toggling surfaces an error event instead.
#[derive(Debug, Default)]
pub struct UnsupportedCapture;

#[async_trait]
impl CaptureEngine for UnsupportedCapture {
    fn is_supported(&self) -> bool {
        false
    }

    async fn start(&mut self, _params: SessionParams) -> Result<mpsc::Receiver<CaptureEvent>> {
        Err(Error::Capture(
            "speech recognition is not supported on this platform".to_string(),
        ))
    }

    async fn stop(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Message shown when toggling capture on an unsupported platform
const UNSUPPORTED_MESSAGE: &str = "Speech recognition is not supported on this platform";

/// Drives the capture session state machine over an injected engine
///
/// No state persists across sessions; the interim transcript is cleared
/// whenever the session returns to idle.
pub struct CaptureController {
    engine: Box<dyn CaptureEngine>,
    params: SessionParams,
    state: CaptureState,
    interim: String,
    events: Option<mpsc::Receiver<CaptureEvent>>,
}

impl CaptureController {
    /// Create a controller around a platform engine
    #[must_use]
    pub fn new(engine: Box<dyn CaptureEngine>, params: SessionParams) -> Self {
        Self {
            engine,
            params,
            state: CaptureState::Idle,
            interim: String::new(),
            events: None,
        }
    }

    /// Whether the platform supports capture (computed from the engine)
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.engine.is_supported()
    }

    /// Whether the engine is actively listening
    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.state == CaptureState::Listening
    }

    /// Current session state
    #[must_use]
    pub const fn state(&self) -> CaptureState {
        self.state
    }

    /// Current interim transcript (empty when idle)
    #[must_use]
    pub fn interim(&self) -> &str {
        &self.interim
    }

    /// Whether a session event stream is open
    #[must_use]
    pub const fn has_session(&self) -> bool {
        self.events.is_some()
    }

    /// Flip between idle and listening
    ///
    /// From idle, starts a session; from starting or listening, requests a
    /// stop. On an unsupported platform no session is started and an
    /// [`CaptureEvent::Error`] is delivered through the event stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine fails to start or stop the session.
    pub async fn toggle(&mut self) -> Result<()> {
        if !self.engine.is_supported() {
            tracing::warn!("capture toggled on unsupported platform");
            let (tx, rx) = mpsc::channel(1);
            // Queue the error so it flows through the same event path
            let _ = tx.try_send(CaptureEvent::Error(UNSUPPORTED_MESSAGE.to_string()));
            self.events = Some(rx);
            return Ok(());
        }

        match self.state {
            CaptureState::Idle => {
                let rx = self.engine.start(self.params.clone()).await?;
                self.state = CaptureState::Starting;
                self.interim.clear();
                self.events = Some(rx);
                tracing::debug!(locale = %self.params.locale, "capture session starting");
            }
            CaptureState::Starting | CaptureState::Listening => {
                self.engine.stop().await?;
                self.state = CaptureState::Idle;
                self.interim.clear();
                tracing::debug!("capture stop requested");
            }
        }

        Ok(())
    }

    /// Await the next session event, applying state transitions
    ///
    /// Returns `None` when no session is open or the engine closed the
    /// stream. Terminal events (`Error`, `Ended`) tear the stream down.
    pub async fn next_event(&mut self) -> Option<CaptureEvent> {
        let event = self.events.as_mut()?.recv().await;

        let Some(event) = event else {
            self.events = None;
            return None;
        };

        self.apply(&event);
        if matches!(event, CaptureEvent::Error(_) | CaptureEvent::Ended) {
            self.events = None;
        }
        Some(event)
    }

    /// Apply one event to the state machine
    fn apply(&mut self, event: &CaptureEvent) {
        match event {
            CaptureEvent::Ready => {
                if self.state == CaptureState::Starting {
                    self.state = CaptureState::Listening;
                    tracing::debug!("capture session listening");
                }
            }
            CaptureEvent::Interim(text) => {
                // Replace, never append
                self.interim.clear();
                self.interim.push_str(text);
            }
            CaptureEvent::Final(text) => {
                tracing::debug!(chars = text.len(), "final transcript");
            }
            CaptureEvent::Error(reason) => {
                tracing::warn!(%reason, "capture session error");
                self.state = CaptureState::Idle;
                self.interim.clear();
            }
            CaptureEvent::Ended => {
                tracing::debug!("capture session ended");
                self.state = CaptureState::Idle;
                self.interim.clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_discrete_with_interim() {
        let params = SessionParams::default();
        assert_eq!(params.locale, DEFAULT_LOCALE);
        assert!(!params.continuous);
        assert!(params.interim_results);
    }

    #[tokio::test]
    async fn unsupported_toggle_queues_error_event() {
        let mut controller =
            CaptureController::new(Box::new(UnsupportedCapture), SessionParams::default());
        assert!(!controller.is_supported());

        controller.toggle().await.unwrap();
        assert_eq!(controller.state(), CaptureState::Idle);

        let event = controller.next_event().await.unwrap();
        assert!(matches!(event, CaptureEvent::Error(_)));
    }
}
