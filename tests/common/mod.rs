//! Shared test utilities
//!
//! Mock speech engines (scripted event playback over the real trait seams)
//! and an axum-backed mock Q&A endpoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use tokio::sync::mpsc;

use parley_voice::voice::{
    CaptureEngine, CaptureEvent, PlaybackEvent, SessionParams, SpeechEngine, Utterance,
};
use parley_voice::Result;

/// Capture engine that replays a fixed script of session events
pub struct ScriptedCapture {
    script: Vec<CaptureEvent>,
    started: Arc<AtomicUsize>,
    stopped: Arc<AtomicUsize>,
}

impl ScriptedCapture {
    /// Engine that emits `script` once a session starts
    #[must_use]
    pub fn new(script: Vec<CaptureEvent>) -> Self {
        Self {
            script,
            started: Arc::new(AtomicUsize::new(0)),
            stopped: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared counter of start calls
    pub fn started(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.started)
    }

    /// Shared counter of stop calls
    pub fn stopped(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.stopped)
    }
}

#[async_trait]
impl CaptureEngine for ScriptedCapture {
    fn is_supported(&self) -> bool {
        true
    }

    async fn start(&mut self, _params: SessionParams) -> Result<mpsc::Receiver<CaptureEvent>> {
        self.started.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = mpsc::channel(self.script.len().max(1));
        for event in self.script.clone() {
            let _ = tx.try_send(event);
        }
        // Sender drops here; the stream closes once the script drains
        Ok(rx)
    }

    async fn stop(&mut self) -> Result<()> {
        self.stopped.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Speech engine that records spoken text and counts cancellations
pub struct RecordingSpeech {
    spoken: Arc<Mutex<Vec<String>>>,
    cancelled: Arc<AtomicUsize>,
    /// Playback events delivered for each utterance
    events: Vec<PlaybackEvent>,
}

impl RecordingSpeech {
    /// Engine whose utterances play through start and end
    #[must_use]
    pub fn new() -> Self {
        Self {
            spoken: Arc::new(Mutex::new(Vec::new())),
            cancelled: Arc::new(AtomicUsize::new(0)),
            events: vec![PlaybackEvent::Started, PlaybackEvent::Ended],
        }
    }

    /// Engine whose utterances emit only the given events
    #[must_use]
    pub fn with_events(events: Vec<PlaybackEvent>) -> Self {
        Self {
            events,
            ..Self::new()
        }
    }

    /// Texts spoken so far
    pub fn spoken(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.spoken)
    }

    /// Cancellation counter
    pub fn cancelled(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.cancelled)
    }
}

impl Default for RecordingSpeech {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechEngine for RecordingSpeech {
    fn is_supported(&self) -> bool {
        true
    }

    async fn speak(&mut self, utterance: Utterance) -> Result<mpsc::Receiver<PlaybackEvent>> {
        self.spoken
            .lock()
            .expect("spoken lock poisoned")
            .push(utterance.text);
        let (tx, rx) = mpsc::channel(self.events.len().max(1));
        for event in self.events.clone() {
            let _ = tx.try_send(event);
        }
        Ok(rx)
    }

    async fn cancel(&mut self) -> Result<()> {
        self.cancelled.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Spawn a mock `/ask` backend returning a fixed status and body
///
/// Returns the base URL to point an `AskClient` at.
pub async fn spawn_backend(status: StatusCode, body: serde_json::Value) -> String {
    let app = Router::new().route(
        "/ask",
        post(move |Json(_request): Json<serde_json::Value>| {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind mock backend");
    let addr = listener.local_addr().expect("no local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend failed");
    });

    format!("http://{addr}")
}

/// A base URL with nothing listening behind it
pub async fn unreachable_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind");
    let addr: SocketAddr = listener.local_addr().expect("no local addr");
    drop(listener);
    format!("http://{addr}")
}
