//! Voice interaction: one record-transcribe-respond-speak cycle at a time.

mod pipeline;
mod session;

pub use pipeline::{VoiceError, VoiceOutcome, VoicePipeline, VoiceResult, VoiceState};
pub use session::VoiceSession;
