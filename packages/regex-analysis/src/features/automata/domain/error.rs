//! Automaton error types

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
    #[error("Automaton state limit of {limit} exceeded")]
    StateLimitExceeded { limit: usize },

    #[error("Automaton construction timed out")]
    Timeout,

    /// Regex construct with no automaton counterpart
    #[error("Unsupported construct: {0}")]
    Unsupported(String),
}

impl From<AutomatonError> for crate::errors::RegexAnalysisError {
    fn from(err: AutomatonError) -> Self {
        use crate::errors::RegexAnalysisError;
        match err {
            AutomatonError::StateLimitExceeded { limit } => {
                RegexAnalysisError::AutomatonLimitExceeded { limit }
            }
            AutomatonError::Timeout => RegexAnalysisError::SolverTimeout,
            AutomatonError::Unsupported(msg) => RegexAnalysisError::Unsupported(msg),
        }
    }
}
