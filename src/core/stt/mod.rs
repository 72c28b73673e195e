//! Speech-to-text collaborator: trait abstraction and the Whisper client.

mod base;
pub mod whisper;

pub use base::{SpeechToText, SttConfig, SttError, SttResult};
pub use whisper::{WHISPER_STT_URL, WhisperStt};
