//! Error types for score values

use thiserror::Error;

/// Errors raised while building, combining or parsing scores.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// The score string does not follow the pattern of its score type.
    #[error("The scoreString ({input}) for the score type ({score_type}) is invalid: {reason}")]
    Parse {
        input: String,
        score_type: &'static str,
        reason: String,
    },

    /// Two scores with a different level layout were combined.
    #[error("The score ({left}) is not compatible with the other score ({right})")]
    Incompatible { left: String, right: String },

    /// A level vector does not have the length the score shape requires.
    #[error("Expected {expected} score levels, got {actual}")]
    LevelCount { expected: usize, actual: usize },
}

impl ScoreError {
    pub(crate) fn parse(
        input: &str,
        score_type: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        ScoreError::Parse {
            input: input.to_string(),
            score_type,
            reason: reason.into(),
        }
    }
}

/// Result type alias for score operations
pub type Result<T> = std::result::Result<T, ScoreError>;
