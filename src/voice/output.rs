//! Speech output (text-to-speech playback)
//!
//! The synthesis engine lives behind [`SpeechEngine`]. The controller keeps
//! the speaking flag honest by consuming the engine's playback lifecycle
//! events rather than guessing from call timing.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::{Error, Result};

/// Playback rate multiplier (fixed, no configuration surface)
pub const RATE: f32 = 1.0;

/// Voice pitch (fixed)
pub const PITCH: f32 = 1.0;

/// Playback volume (fixed)
pub const VOLUME: f32 = 1.0;

/// One piece of text queued for synthesis
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// Text to speak
    pub text: String,
    /// Rate multiplier
    pub rate: f32,
    /// Voice pitch
    pub pitch: f32,
    /// Playback volume
    pub volume: f32,
}

impl Utterance {
    /// An utterance at the fixed neutral parameters
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rate: RATE,
            pitch: PITCH,
            volume: VOLUME,
        }
    }
}

/// Playback lifecycle events, in engine order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// Audio playback began
    Started,
    /// Playback finished normally
    Ended,
    /// Playback failed; the utterance is over
    Error(String),
}

/// Platform text-to-speech capability
#[async_trait]
pub trait SpeechEngine: Send {
    /// Whether the platform can synthesize speech at all
    fn is_supported(&self) -> bool;

    /// Enqueue an utterance, returning its playback event stream
    ///
    /// # Errors
    ///
    /// Returns an error if the engine rejects the utterance.
    async fn speak(&mut self, utterance: Utterance) -> Result<mpsc::Receiver<PlaybackEvent>>;

    /// Cancel all queued and playing utterances immediately
    ///
    /// # Errors
    ///
    /// Returns an error if cancellation fails.
    async fn cancel(&mut self) -> Result<()>;
}

/// A speech engine for hosts without synthesis support
#[derive(Debug, Default)]
pub struct UnsupportedSpeech;

#[async_trait]
impl SpeechEngine for UnsupportedSpeech {
    fn is_supported(&self) -> bool {
        false
    }

    async fn speak(&mut self, _utterance: Utterance) -> Result<mpsc::Receiver<PlaybackEvent>> {
        Err(Error::Speech(
            "text-to-speech is not supported on this platform".to_string(),
        ))
    }

    async fn cancel(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Tracks speaking state over an injected synthesis engine
pub struct OutputController {
    engine: Box<dyn SpeechEngine>,
    speaking: bool,
    events: Option<mpsc::Receiver<PlaybackEvent>>,
}

impl OutputController {
    /// Create a controller around a platform engine
    #[must_use]
    pub fn new(engine: Box<dyn SpeechEngine>) -> Self {
        Self {
            engine,
            speaking: false,
            events: None,
        }
    }

    /// Whether the platform supports speech output
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.engine.is_supported()
    }

    /// Whether the engine reports active playback
    #[must_use]
    pub const fn is_speaking(&self) -> bool {
        self.speaking
    }

    /// Whether an utterance event stream is open
    #[must_use]
    pub const fn has_utterance(&self) -> bool {
        self.events.is_some()
    }

    /// Cancel any in-progress utterance and speak `text`
    ///
    /// On an unsupported platform this is a no-op that logs a warning; no
    /// error reaches the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine fails to cancel or enqueue.
    pub async fn speak(&mut self, text: &str) -> Result<()> {
        if !self.engine.is_supported() {
            tracing::warn!("text-to-speech is not supported on this platform");
            return Ok(());
        }

        self.engine.cancel().await?;
        self.speaking = false;

        let rx = self.engine.speak(Utterance::new(text)).await?;
        self.events = Some(rx);
        tracing::debug!(chars = text.len(), "utterance enqueued");
        Ok(())
    }

    /// Cancel playback and clear the speaking flag
    ///
    /// # Errors
    ///
    /// Returns an error if the engine fails to cancel.
    pub async fn stop(&mut self) -> Result<()> {
        self.engine.cancel().await?;
        self.speaking = false;
        self.events = None;
        tracing::debug!("speech output stopped");
        Ok(())
    }

    /// Await the next playback event, updating the speaking flag
    ///
    /// Returns `None` when no utterance is active or the engine closed the
    /// stream. Terminal events (`Ended`, `Error`) tear the stream down.
    pub async fn next_event(&mut self) -> Option<PlaybackEvent> {
        let event = self.events.as_mut()?.recv().await;

        let Some(event) = event else {
            self.events = None;
            return None;
        };

        match &event {
            PlaybackEvent::Started => self.speaking = true,
            PlaybackEvent::Ended => {
                self.speaking = false;
                self.events = None;
            }
            PlaybackEvent::Error(reason) => {
                // Not surfaced to the caller; playback errors only clear state
                tracing::warn!(%reason, "speech playback error");
                self.speaking = false;
                self.events = None;
            }
        }
        Some(event)
    }
}
