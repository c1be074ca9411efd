//! Transcript rendering for HTML-style surfaces

use chef_application::{ChatError, ChatObserver};
use chef_domain::Message;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Convert answer text for a surface that renders markup: newlines become
/// `<br>`.
pub fn to_markup(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "<br>")
}

/// A growing `You:` / `Chef:` transcript with newlines rendered as `<br>`.
///
/// Deltas are appended as they arrive, so the transcript can be redrawn
/// mid-answer.
#[derive(Debug, Default, Clone)]
pub struct DisplayTranscript {
    markup: String,
}

impl DisplayTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_turn(&mut self, question: &str) {
        self.markup.push_str("You: ");
        self.markup.push_str(&to_markup(question));
        self.markup.push_str("<br>Chef: ");
    }

    pub fn push_delta(&mut self, text: &str) {
        self.markup.push_str(&to_markup(text));
    }

    /// Blank line after a finished turn.
    pub fn end_turn(&mut self) {
        self.markup.push_str("<br><br>");
    }

    pub fn push_notice(&mut self, notice: &str) {
        self.markup.push_str(&to_markup(notice));
        self.markup.push_str("<br><br>");
    }

    pub fn as_str(&self) -> &str {
        &self.markup
    }

    pub fn is_empty(&self) -> bool {
        self.markup.is_empty()
    }
}

/// [`ChatObserver`] that records turns into a [`DisplayTranscript`].
#[derive(Default)]
pub struct TranscriptObserver {
    transcript: Mutex<DisplayTranscript>,
}

impl TranscriptObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> DisplayTranscript {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, DisplayTranscript> {
        self.transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl ChatObserver for TranscriptObserver {
    fn on_turn_start(&self, question: &str) {
        self.lock().begin_turn(question);
    }

    fn on_delta(&self, text: &str) {
        self.lock().push_delta(text);
    }

    fn on_turn_complete(&self, _message: &Message) {
        self.lock().end_turn();
    }

    fn on_turn_failed(&self, error: &ChatError) {
        let mut transcript = self.lock();
        transcript.end_turn();
        transcript.push_notice(error.user_message());
    }
}
