//! Chat observer port
//!
//! Receives the notifications of a turn, in order, on the task that drives
//! [`ChatSession::ask`](crate::ChatSession::ask).

use crate::use_cases::chat_session::ChatError;
use chef_domain::Message;

/// Callback for turn progress
///
/// Implementations live in the presentation layer and decide how text is
/// rendered. For a given turn the order is: `on_turn_start`, then
/// `on_streaming_start`, then zero or more `on_delta`, then exactly one of
/// `on_turn_complete` / `on_turn_failed` as the last call. A cancelled turn
/// receives no further calls after the cancellation.
pub trait ChatObserver: Send + Sync {
    /// The question was accepted and recorded.
    fn on_turn_start(&self, _question: &str) {}

    /// The endpoint accepted the request and the body is being read.
    fn on_streaming_start(&self) {}

    /// An incremental fragment of the answer.
    fn on_delta(&self, text: &str);

    /// The answer was committed to history.
    fn on_turn_complete(&self, _message: &Message) {}

    /// The turn ended with an error; nothing was committed for the assistant.
    fn on_turn_failed(&self, _error: &ChatError) {}
}

/// No-op observer for when only the final result matters
pub struct NoChatObserver;

impl ChatObserver for NoChatObserver {
    fn on_delta(&self, _text: &str) {}
}
