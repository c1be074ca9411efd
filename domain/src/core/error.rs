//! Domain error types

use crate::session::state::SessionState;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Question cannot be empty")]
    EmptyQuestion,

    #[error("Invalid session transition: {from} -> {to}")]
    InvalidTransition {
        from: SessionState,
        to: SessionState,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_question_display() {
        assert_eq!(
            DomainError::EmptyQuestion.to_string(),
            "Question cannot be empty"
        );
    }

    #[test]
    fn test_invalid_transition_display() {
        let error = DomainError::InvalidTransition {
            from: SessionState::Idle,
            to: SessionState::Committing,
        };
        assert_eq!(
            error.to_string(),
            "Invalid session transition: idle -> committing"
        );
    }
}
