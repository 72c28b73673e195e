//! Whisper-style REST transcription provider.
//!
//! Unlike streaming STT services, Whisper takes one finished audio file per
//! request. That matches the voice pipeline here exactly: capture finalizes
//! a single utterance, which is uploaded whole.

mod client;
pub mod messages;

pub use client::WhisperStt;

/// Default Whisper transcription endpoint.
pub const WHISPER_STT_URL: &str = "https://api.openai.com/v1/audio/transcriptions";
