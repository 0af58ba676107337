//! Error types for regex-analysis
//!
//! Provides unified error handling across the crate.

use crate::config::ConfigError;
use crate::shared::models::IndexRange;
use thiserror::Error;

/// Malformed regex source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Syntax error at {range}: {message}")]
pub struct SyntaxError {
    pub range: IndexRange,
    pub message: String,
}

impl SyntaxError {
    pub fn new(range: IndexRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

/// Main error type for regex-analysis operations
#[derive(Debug, Error)]
pub enum RegexAnalysisError {
    /// Regex could not be parsed
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// Construct outside the supported fragment (back-references, conditionals, ...)
    #[error("Unsupported construct: {0}")]
    Unsupported(String),

    /// Solver gave up before reaching a verdict
    #[error("Solver timeout")]
    SolverTimeout,

    /// Solver resource ceiling reached
    #[error("Resource limit reached: {0}")]
    ResourceLimit(String),

    /// Automaton construction exceeded its state budget
    #[error("Automaton state limit of {limit} exceeded")]
    AutomatonLimitExceeded { limit: usize },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RegexAnalysisError {
    /// Create an unsupported-construct error
    pub fn unsupported(msg: impl Into<String>) -> Self {
        RegexAnalysisError::Unsupported(msg.into())
    }
}

/// Result type alias for regex-analysis operations
pub type Result<T> = std::result::Result<T, RegexAnalysisError>;
