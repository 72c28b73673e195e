//! Chat completion collaborator: trait, wire types, and streaming client.

mod base;
mod client;
pub mod messages;

pub use base::{
    ChatConfig, ChatError, ChatResult, ChatStream, DEFAULT_CHAT_ENDPOINT, DEFAULT_CHAT_MODEL,
    DEFAULT_SYSTEM_PROMPT, DeltaStream,
};
pub use client::OpenRouterChat;

use futures_util::StreamExt;

use crate::core::context::SessionContext;
use crate::core::transcript::Transcript;

/// Drive one completion stream into the transcript.
///
/// Opens the stream for the transcript's current turns, folds every delta
/// into the trailing assistant turn as it arrives, and seals that turn when
/// the stream ends. On a mid-flight failure the partial turn is rolled back
/// before the error is returned - the transcript is never left with a
/// half-written assistant turn.
///
/// Returns the final assistant text, or `None` for a stream that produced
/// no deltas.
pub async fn drive_completion(
    chat: &dyn ChatStream,
    ctx: &SessionContext,
    transcript: &mut Transcript,
) -> ChatResult<Option<String>> {
    let mut deltas = chat.stream_completion(ctx, transcript.turns()).await?;

    while let Some(item) = deltas.next().await {
        match item {
            Ok(delta) => transcript.apply_delta(&delta),
            Err(e) => {
                transcript.rollback_streaming();
                return Err(e);
            }
        }
    }

    Ok(transcript.finalize_streaming())
}
