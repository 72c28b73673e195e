//! ElevenLabs synthesis provider.

pub mod messages;
mod provider;

pub use provider::ElevenLabsTts;

/// Default ElevenLabs API base URL.
pub const ELEVENLABS_API_URL: &str = "https://api.elevenlabs.io";
