//! Text-to-speech collaborator: trait abstraction and the ElevenLabs provider.

mod base;
pub mod elevenlabs;

pub use base::{SynthesizedAudio, TextToSpeech, TtsConfig, TtsError, TtsResult};
pub use elevenlabs::{ELEVENLABS_API_URL, ElevenLabsTts};
