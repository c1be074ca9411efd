//! Turn lifecycle of a chat session.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Where a session is within the current turn.
///
/// ```text
/// Idle → Sending → Streaming → Committing → Idle
///          │           │
///          └───────────┴──── (error / cancel) ──→ Idle
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Ready to accept a question.
    #[default]
    Idle,
    /// User message recorded, request being dispatched.
    Sending,
    /// Response lines are being read and parsed.
    Streaming,
    /// Assembled answer is being appended to history.
    Committing,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Sending => "sending",
            SessionState::Streaming => "streaming",
            SessionState::Committing => "committing",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, SessionState::Idle)
    }

    /// Whether a request is in flight (a new turn must be rejected).
    pub fn is_busy(&self) -> bool {
        !self.is_idle()
    }

    pub fn can_transition_to(&self, next: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, next),
            (Idle, Sending)
                | (Sending, Streaming)
                | (Streaming, Committing)
                | (Committing, Idle)
                | (Sending, Idle)
                | (Streaming, Idle)
        )
    }

    /// Validated transition.
    pub fn transition(self, next: SessionState) -> Result<SessionState, DomainError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(DomainError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
