//! Response streaming events.
//!
//! `StreamEvent` is what the streaming loop reports to its caller while a
//! model response is being reassembled, so transports can forward partial
//! text to clients as it grows.

use serde::{Deserialize, Serialize};

/// Events emitted while a response stream is assembled.
///
/// - `chunk` — one token was folded in; `text` is the full text so far
/// - `done`  — the stream ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// A token was appended.
    Chunk { token: String, text: String },

    /// The stream is complete — final text and token count.
    Done { text: String, tokens: usize },
}

impl StreamEvent {
    /// Wire event name for this event type.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Chunk { .. } => "chunk",
            Self::Done { .. } => "done",
        }
    }

    /// The accumulated text carried by the event.
    pub fn text(&self) -> &str {
        match self {
            Self::Chunk { text, .. } | Self::Done { text, .. } => text,
        }
    }
}
