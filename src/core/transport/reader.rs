//! Incremental line reader over a fallible byte stream.
//!
//! Network bodies arrive in arbitrary chunks: a logical line may span two or
//! more chunks, and a single chunk may carry many lines. The reader buffers
//! the trailing partial line of each chunk and prefixes it onto the next
//! chunk before splitting, so the produced lines are identical to what a
//! single-chunk delivery would yield.
//!
//! The reader is lazy: it pulls from the underlying stream only when the
//! caller polls for the next line. It is restartable per call but not
//! resumable mid-stream; a fresh response body gets a fresh reader.

use std::time::Duration;

use async_stream::try_stream;
use bytes::{Bytes, BytesMut};
use futures::Stream;
use futures_util::StreamExt;
use thiserror::Error;

/// Failure of the underlying byte stream.
///
/// Surfaced to the caller, never swallowed. A single malformed *event* is a
/// [`super::event::DecodeError`] and is recovered locally; a transport error
/// ends the stream.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The underlying stream reported an error (connection reset, TLS
    /// failure, body truncation reported by the HTTP layer).
    #[error("stream error: {0}")]
    Stream(String),

    /// No chunk arrived within the configured idle window.
    #[error("stream idle for {0:?} while waiting for the next chunk")]
    Timeout(Duration),
}

/// Split a fallible byte stream into logical text lines.
///
/// Lines are terminated by `\n`; a trailing `\r` is stripped so CRLF bodies
/// decode the same as LF bodies. A final unterminated line is flushed when
/// the stream completes. Line content is decoded lossily as UTF-8: the wire
/// protocol is ASCII-framed and payload bytes that fail to decode can only
/// come from a corrupt event, which the event parser discards anyway.
///
/// # Arguments
/// * `input` - stream of byte chunks, e.g. `reqwest::Response::bytes_stream`
///
/// # Errors
/// Yields `Err(TransportError::Stream)` and terminates if the underlying
/// stream errors.
pub fn line_stream<S, E>(input: S) -> impl Stream<Item = Result<String, TransportError>>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: std::fmt::Display,
{
    try_stream! {
        let mut input = std::pin::pin!(input);
        let mut buf = BytesMut::new();

        while let Some(chunk) = input.next().await {
            let chunk = chunk.map_err(|e| TransportError::Stream(e.to_string()))?;
            buf.extend_from_slice(&chunk);

            // Drain every complete line the buffer now holds. Whatever is
            // left after the last newline stays buffered for the next chunk.
            while let Some(pos) = buf.iter().position(|&b| b == b'\n') {
                let line = buf.split_to(pos + 1);
                let line = &line[..line.len() - 1];
                let line = line.strip_suffix(b"\r").unwrap_or(line);
                yield String::from_utf8_lossy(line).into_owned();
            }
        }

        // Unterminated trailing line at end of stream.
        if !buf.is_empty() {
            let line = buf.strip_suffix(b"\r").unwrap_or(&buf);
            yield String::from_utf8_lossy(line).into_owned();
        }
    }
}
