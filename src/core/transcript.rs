//! Conversation transcript and delta accumulation.
//!
//! A transcript is an ordered sequence of turns. Turns are append-only for
//! the lifetime of a conversation view, with one exception: while a
//! completion streams, the trailing assistant turn grows in place as deltas
//! arrive. Whether a turn is still being written is explicit type state
//! ([`TurnContent::Streaming`]), not inferred from position.
//!
//! Exactly one logical stream feeds a transcript at a time; the orchestrator
//! enforces that, so no synchronization lives here.

use serde::{Deserialize, Serialize};

/// Attribution of one message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Wire name used by the chat completion protocol.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// Turn content, tagged with its completion state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "state", content = "text")]
pub enum TurnContent {
    /// Finished text; will never change again.
    Complete(String),
    /// Partial text of an in-flight completion; grows as deltas arrive and
    /// is sealed by [`Transcript::finalize_streaming`].
    Streaming(String),
}

/// One message in a conversation, attributed to user or assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: TurnContent,
}

impl Turn {
    /// A completed user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: TurnContent::Complete(text.into()),
        }
    }

    /// A completed assistant turn.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: TurnContent::Complete(text.into()),
        }
    }

    /// The turn's visible text, complete or not.
    pub fn text(&self) -> &str {
        match &self.content {
            TurnContent::Complete(text) | TurnContent::Streaming(text) => text,
        }
    }

    /// Whether this turn is still being written.
    pub fn is_streaming(&self) -> bool {
        matches!(self.content, TurnContent::Streaming(_))
    }
}

/// Ordered sequence of turns owned by one conversation view.
///
/// Not persisted here; an embedding application may serialize it (the types
/// derive serde) but durability is a collaborator concern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// An empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// A transcript seeded with an opening assistant greeting.
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::assistant(greeting)],
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Append a completed user turn.
    pub fn push_user(&mut self, text: impl Into<String>) {
        debug_assert!(!self.has_streaming_turn(), "user turn during a stream");
        self.turns.push(Turn::user(text));
    }

    /// Append a completed assistant turn.
    pub fn push_assistant(&mut self, text: impl Into<String>) {
        debug_assert!(!self.has_streaming_turn(), "assistant turn during a stream");
        self.turns.push(Turn::assistant(text));
    }

    /// Fold one delta into the transcript.
    ///
    /// If the last turn is an in-progress assistant turn, the delta is
    /// appended to it in place; otherwise a new streaming assistant turn is
    /// started. Deltas must be applied in arrival order within a single
    /// stream; a retried stream starts a fresh assistant turn.
    pub fn apply_delta(&mut self, delta: &str) {
        match self.turns.last_mut() {
            Some(turn) if turn.is_streaming() => {
                if let TurnContent::Streaming(text) = &mut turn.content {
                    text.push_str(delta);
                }
            }
            _ => self.turns.push(Turn {
                role: Role::Assistant,
                content: TurnContent::Streaming(delta.to_string()),
            }),
        }
    }

    /// Seal the trailing streaming turn as complete.
    ///
    /// Returns the final assistant text, or `None` if the stream produced no
    /// deltas (a terminal event with nothing before it leaves the transcript
    /// untouched).
    pub fn finalize_streaming(&mut self) -> Option<String> {
        let turn = self.turns.last_mut()?;
        if let TurnContent::Streaming(text) = &turn.content {
            let text = text.clone();
            turn.content = TurnContent::Complete(text.clone());
            Some(text)
        } else {
            None
        }
    }

    /// Discard the trailing streaming turn after a failed stream.
    ///
    /// Returns whether a turn was removed. Completed turns are never
    /// touched.
    pub fn rollback_streaming(&mut self) -> bool {
        if self.turns.last().is_some_and(Turn::is_streaming) {
            self.turns.pop();
            true
        } else {
            false
        }
    }

    fn has_streaming_turn(&self) -> bool {
        self.turns.last().is_some_and(Turn::is_streaming)
    }
}
