//! MedGuard Companion Core.
//!
//! The headless conversational engine behind the MedGuard patient
//! companion: a streaming chat client over OpenAI-compatible completion
//! endpoints, and a voice pipeline that sequences
//! record -> transcribe -> converse -> synthesize -> play. UI, persistence
//! and authentication live elsewhere; this crate owns the transcript and
//! the orchestration, and talks to its collaborators through trait seams.

pub mod config;
pub mod core;
pub mod utils;

// Re-export commonly used items for convenience
pub use config::{CompanionConfig, ConfigError};
pub use core::*;
