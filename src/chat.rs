//! Chat orchestration
//!
//! Coordinates submission (typed or finalized speech) against the Q&A
//! backend: append the user turn, issue one request, append the assistant
//! turn or surface an error, then optionally speak the reply. All state
//! mutation happens on the caller's task; the conversation needs no locks.

use tokio::sync::mpsc;

use crate::backend::AskClient;
use crate::conversation::{Conversation, Turn};
use crate::voice::{CaptureEvent, OutputController, PlaybackEvent};

/// User-visible message when the backend cannot be reached
pub const BACKEND_UNREACHABLE: &str = "Failed to connect to backend. Is it running?";

/// Transient user-visible notifications
///
/// Delivered best-effort over an mpsc channel; the UI renders and discards
/// them. Every notice is terminal for the operation that raised it and
/// fatal to nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Speech recognition failed; carries the engine-reported reason
    Capture(String),
    /// The backend request failed (connectivity or non-success status)
    Backend(String),
}

/// Coordinates conversation state, the backend client, and speech output
pub struct ChatOrchestrator {
    conversation: Conversation,
    client: AskClient,
    output: OutputController,
    speech_enabled: bool,
    notify: Option<mpsc::Sender<Notice>>,
}

impl ChatOrchestrator {
    /// Create an orchestrator with speech output enabled
    #[must_use]
    pub fn new(client: AskClient, output: OutputController) -> Self {
        Self {
            conversation: Conversation::new(),
            client,
            output,
            speech_enabled: true,
            notify: None,
        }
    }

    /// Attach a channel for transient notifications
    #[must_use]
    pub fn with_notifications(mut self, notify: mpsc::Sender<Notice>) -> Self {
        self.notify = Some(notify);
        self
    }

    /// Read-only view of the conversation for rendering
    #[must_use]
    pub const fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Whether assistant replies are spoken aloud
    #[must_use]
    pub const fn speech_enabled(&self) -> bool {
        self.speech_enabled
    }

    /// Whether speech output is currently playing
    #[must_use]
    pub const fn is_speaking(&self) -> bool {
        self.output.is_speaking()
    }

    /// Replace the draft input (typed keystrokes and interim mirroring)
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.conversation.set_draft(text);
    }

    /// Submit the current draft (enter key or explicit send)
    pub async fn submit_draft(&mut self) {
        let text = self.conversation.draft().to_string();
        self.submit(&text).await;
    }

    /// Submit one question to the backend
    ///
    /// No-op when `text` is empty after trimming. Otherwise: append a user
    /// turn, clear the draft, set processing, issue the request, append the
    /// assistant turn (or surface a [`Notice::Backend`]), optionally speak
    /// the reply, and clear processing last. Only the latest question is
    /// sent; no history accompanies the request.
    ///
    /// A second submit while processing is neither queued nor rejected; the
    /// processing flag is advisory (it gates the UI affordance, not the
    /// data layer).
    pub async fn submit(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        self.conversation.push(Turn::user(text));
        self.conversation.clear_draft();
        self.conversation.set_processing(true);

        match self.client.ask(text).await {
            Ok(answer) => {
                self.conversation.push(Turn::assistant(&answer));
                if self.speech_enabled {
                    if let Err(e) = self.output.speak(&answer).await {
                        tracing::warn!(error = %e, "failed to speak reply");
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "ask request failed");
                self.notice(Notice::Backend(BACKEND_UNREACHABLE.to_string()))
                    .await;
            }
        }

        self.conversation.set_processing(false);
    }

    /// Dispatch one capture session event
    ///
    /// Interim transcripts mirror into the draft (replacing it); a final
    /// transcript is submitted as if typed; errors surface a
    /// [`Notice::Capture`]; session end clears the mirrored draft.
    pub async fn handle_capture_event(&mut self, event: CaptureEvent) {
        match event {
            CaptureEvent::Ready => {}
            CaptureEvent::Interim(text) => {
                self.conversation.set_draft(text);
            }
            CaptureEvent::Final(text) => {
                self.submit(&text).await;
            }
            CaptureEvent::Error(reason) => {
                self.notice(Notice::Capture(reason)).await;
            }
            CaptureEvent::Ended => {
                self.conversation.clear_draft();
            }
        }
    }

    /// Flip speech output on or off, stopping any current playback first
    pub async fn toggle_speech_output(&mut self) {
        if self.output.is_speaking() {
            if let Err(e) = self.output.stop().await {
                tracing::warn!(error = %e, "failed to stop speech output");
            }
        }
        self.speech_enabled = !self.speech_enabled;
        tracing::debug!(enabled = self.speech_enabled, "speech output toggled");
    }

    /// Await the next speech playback event, updating the speaking flag
    pub async fn next_playback_event(&mut self) -> Option<PlaybackEvent> {
        self.output.next_event().await
    }

    /// Best-effort notification delivery; never blocks the operation
    async fn notice(&self, notice: Notice) {
        if let Some(tx) = &self.notify {
            let _ = tx.send(notice).await;
        }
    }
}
