//! Voice processing module
//!
//! Speech capture and speech output both sit behind injected engine traits;
//! the platform recognition/synthesis machinery is an external collaborator
//! and is never reimplemented here.

mod capture;
mod output;

pub use capture::{
    CaptureController, CaptureEngine, CaptureEvent, CaptureState, DEFAULT_LOCALE, SessionParams,
    UnsupportedCapture,
};
pub use output::{
    OutputController, PITCH, PlaybackEvent, RATE, SpeechEngine, UnsupportedSpeech, Utterance,
    VOLUME,
};
