//! Parley - voice and text chat client for AI question answering
//!
//! This library provides the client-side wiring for a voice-enabled chat:
//! - Speech capture session control (toggle, interim/final transcripts)
//! - Speech output control (speak, cancel, speaking state)
//! - Conversation state (turns, draft input, processing flag)
//! - Chat orchestration against a remote Q&A endpoint
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                  CLI / rendering                  │
//! └───────────────────────┬──────────────────────────┘
//!                         │
//! ┌───────────────────────▼──────────────────────────┐
//! │               Chat orchestrator                   │
//! │  Conversation │ Notices │ speech output toggle    │
//! └───────┬───────────────┬──────────────────┬───────┘
//!         │               │                  │
//! ┌───────▼──────┐ ┌──────▼───────┐ ┌────────▼───────┐
//! │ Capture      │ │ Output       │ │ Q&A backend    │
//! │ engine (STT) │ │ engine (TTS) │ │ POST /ask      │
//! └──────────────┘ └──────────────┘ └────────────────┘
//! ```
//!
//! The recognition and synthesis engines are platform capabilities injected
//! behind traits; the backend is a remote HTTP service. Only the
//! orchestration in between lives here.

pub mod backend;
pub mod chat;
pub mod config;
pub mod conversation;
pub mod credential;
pub mod error;
pub mod voice;

pub use backend::{AskClient, DEFAULT_BACKEND_URL, FALLBACK_ANSWER};
pub use chat::{BACKEND_UNREACHABLE, ChatOrchestrator, Notice};
pub use config::Config;
pub use conversation::{Conversation, Role, Turn};
pub use credential::{ApiKey, CredentialStore};
pub use error::{Error, Result};
pub use voice::{
    CaptureController, CaptureEngine, CaptureEvent, CaptureState, OutputController, PlaybackEvent,
    SessionParams, SpeechEngine, Utterance,
};
