//! Folding stream events into the assistant's answer.

use super::entities::{ConversationHistory, Message};
use super::stream::StreamEvent;

/// What the caller should do after feeding an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyStep {
    /// Keep reading lines.
    Continue,
    /// The sentinel was seen; stop reading and finalize.
    Finished,
}

/// Accumulates the in-progress answer of a single turn.
///
/// Feed it every [`StreamEvent`] in arrival order. When the stream ends,
/// either on the sentinel or because the body ran out of lines, call
/// [`finalize`](Self::finalize) to turn the text into an assistant message.
/// Dropping the assembler instead (error, cancellation) records nothing.
#[derive(Debug, Default)]
pub struct TranscriptAssembler {
    buffer: String,
    deltas: usize,
    finished: bool,
}

impl TranscriptAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event, invoking `on_delta` for each text fragment.
    ///
    /// Events arriving after the sentinel are ignored.
    pub fn apply<F>(&mut self, event: StreamEvent, mut on_delta: F) -> AssemblyStep
    where
        F: FnMut(&str),
    {
        if self.finished {
            return AssemblyStep::Finished;
        }

        match event {
            StreamEvent::TextDelta(text) => {
                on_delta(&text);
                self.buffer.push_str(&text);
                self.deltas += 1;
                AssemblyStep::Continue
            }
            StreamEvent::StreamEnd => {
                self.finished = true;
                AssemblyStep::Finished
            }
            StreamEvent::Ignored => AssemblyStep::Continue,
        }
    }

    /// Text accumulated so far.
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Number of deltas received so far.
    pub fn delta_count(&self) -> usize {
        self.deltas
    }

    /// Whether the sentinel was observed (as opposed to the body just ending).
    pub fn saw_sentinel(&self) -> bool {
        self.finished
    }

    /// Close out the turn: the accumulated text becomes the assistant message.
    pub fn finalize(self, history: &mut ConversationHistory) -> Message {
        history.push_assistant(self.buffer).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::chunk_parser::ChunkParser;
    use crate::session::entities::Role;

    fn run(lines: &[&str]) -> (Vec<String>, TranscriptAssembler) {
        let mut assembler = TranscriptAssembler::new();
        let mut notified = Vec::new();
        for line in lines {
            let step = assembler.apply(ChunkParser::parse_line(line), |t| {
                notified.push(t.to_string())
            });
            if step == AssemblyStep::Finished {
                break;
            }
        }
        (notified, assembler)
    }

    #[test]
    fn test_hi_there() {
        let (notified, assembler) = run(&[
            r#"data: {"choices":[{"delta":{"content":"Hi"}}]}"#,
            r#"data: {"choices":[{"delta":{"content":" there"}}]}"#,
            "data: [DONE]",
        ]);
        assert_eq!(notified, vec!["Hi", " there"]);
        assert!(assembler.saw_sentinel());

        let mut history = ConversationHistory::new();
        history.push_user("hello");
        let message = assembler.finalize(&mut history);
        assert_eq!(message.content(), "Hi there");
        assert_eq!(message.role(), Role::Assistant);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_concatenation_and_notification_count() {
        let parts = ["Make ", "Garlic ", "Shrimp ", "Pasta.\n", "15 minutes."];
        let lines: Vec<String> = parts
            .iter()
            .map(|p| {
                format!(
                    "data: {}",
                    serde_json::json!({"choices": [{"delta": {"content": p}}]})
                )
            })
            .chain(std::iter::once("data: [DONE]".to_string()))
            .collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();

        let (notified, assembler) = run(&refs);
        assert_eq!(notified.len(), parts.len());
        assert_eq!(notified, parts);
        assert_eq!(assembler.delta_count(), parts.len());
        assert_eq!(assembler.text(), parts.concat());
    }

    #[test]
    fn test_noise_between_deltas_is_skipped() {
        let (notified, assembler) = run(&[
            ": keep-alive",
            r#"data: {"choices":[{"delta":{"content":"a"}}]}"#,
            "",
            "data: {broken",
            r#"data: {"choices":[{"delta":{"content":"b"}}]}"#,
            "data: [DONE]",
        ]);
        assert_eq!(notified, vec!["a", "b"]);
        assert_eq!(assembler.text(), "ab");
    }

    #[test]
    fn test_exhaustion_without_sentinel_still_finalizes() {
        let (_, assembler) = run(&[r#"data: {"choices":[{"delta":{"content":"partial"}}]}"#]);
        assert!(!assembler.saw_sentinel());

        let mut history = ConversationHistory::new();
        let message = assembler.finalize(&mut history);
        assert_eq!(message.content(), "partial");
        assert_eq!(history.count(Role::Assistant), 1);
    }

    #[test]
    fn test_events_after_sentinel_are_ignored() {
        let mut assembler = TranscriptAssembler::new();
        let mut calls = 0;
        assembler.apply(StreamEvent::StreamEnd, |_| calls += 1);
        let step = assembler.apply(StreamEvent::TextDelta("late".to_string()), |_| calls += 1);
        assert_eq!(step, AssemblyStep::Finished);
        assert_eq!(calls, 0);
        assert_eq!(assembler.text(), "");
    }
}
