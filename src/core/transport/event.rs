//! Protocol event parsing for the chat completion stream.
//!
//! The wire format is OpenAI-compatible server-sent events: each event is a
//! line of the form `data: <payload>`, interleaved with comments, keepalives
//! and blank framing lines that carry no payload. The payload is either the
//! literal sentinel `[DONE]`, which ends the stream, or a JSON
//! `chat.completion.chunk` object whose first choice may carry an
//! incremental content delta.
//!
//! Decoding is best-effort: a single malformed payload is reported as a
//! [`DecodeError`] for the caller to log and skip. Partial or truncated
//! events can occur at chunk boundaries and must never abort the stream.

use serde::Deserialize;
use thiserror::Error;

/// Event prefix mandated by the SSE wire format.
const DATA_PREFIX: &str = "data:";

/// Payload sentinel signalling explicit stream termination.
const DONE_SENTINEL: &str = "[DONE]";

/// A malformed event payload. Recovered locally by the caller (logged and
/// skipped), never propagated as a stream failure.
#[derive(Debug, Error)]
#[error("malformed stream event: {source}")]
pub struct DecodeError {
    #[from]
    source: serde_json::Error,
}

/// A recognized unit parsed off the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// An incremental fragment of assistant output.
    Delta(String),
    /// Explicit end of stream. Events after this are ignored.
    Done,
}

// =============================================================================
// Wire types
// =============================================================================

/// One decoded `chat.completion.chunk` payload.
#[derive(Debug, Deserialize)]
pub struct CompletionChunk {
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChunkChoice {
    #[serde(default)]
    pub delta: DeltaPayload,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The incremental part of a choice. Role arrives on the first chunk only;
/// content may be absent on role-only and finish chunks.
#[derive(Debug, Default, Deserialize)]
pub struct DeltaPayload {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

// =============================================================================
// Parsing
// =============================================================================

/// Interpret one logical line as a protocol event.
///
/// Returns:
/// * `Ok(Some(event))` - a content delta or the terminal sentinel
/// * `Ok(None)` - a line that carries nothing to act on: blank framing
///   lines, comments, keepalives, or a valid chunk without a content delta
///   (role-only and finish chunks). Absence of a delta is not an error.
/// * `Err(DecodeError)` - a `data:` payload that failed to decode; skip it
///   and continue with the stream.
pub fn parse_event(line: &str) -> Result<Option<StreamEvent>, DecodeError> {
    let line = line.trim();

    // The wire interleaves comments and keepalives with events; anything
    // without the event prefix is not ours to interpret.
    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        return Ok(None);
    };
    let payload = payload.trim_start();

    if payload == DONE_SENTINEL {
        return Ok(Some(StreamEvent::Done));
    }

    let chunk: CompletionChunk = serde_json::from_str(payload)?;
    let delta = chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content);

    match delta {
        Some(content) if !content.is_empty() => Ok(Some(StreamEvent::Delta(content))),
        _ => Ok(None),
    }
}
