//! Streaming transport for the chat completion wire protocol.
//!
//! The chat endpoint answers with a `text/event-stream` body: an incremental
//! byte stream carrying line-delimited events. This module splits that
//! transport into two independently testable halves:
//!
//! - [`reader`]: reassembles raw byte chunks into logical text lines,
//!   buffering partial lines across chunk boundaries
//! - [`event`]: interprets each line as a protocol event and extracts the
//!   incremental content delta, if any
//!
//! Neither half touches the network. The HTTP client in
//! [`crate::core::chat`] composes them over a live response body.

pub mod event;
pub mod reader;

pub use event::{DecodeError, StreamEvent, parse_event};
pub use reader::{TransportError, line_stream};
