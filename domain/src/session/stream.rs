//! Streaming events for chat-completion responses.
//!
//! [`StreamEvent`] is the typed form of one line of the response body. Events
//! are consumed immediately by the
//! [`TranscriptAssembler`](super::transcript::TranscriptAssembler) and never
//! stored.

/// One classified line of a streaming response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// An incremental fragment of the answer (never empty).
    TextDelta(String),
    /// The `[DONE]` sentinel: no further deltas will arrive.
    StreamEnd,
    /// Keep-alive, framing, malformed or irrelevant line.
    Ignored,
}
