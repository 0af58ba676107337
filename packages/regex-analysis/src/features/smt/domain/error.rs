//! Translation errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// Construct outside the decidable fragment; callers fall back to their
    /// default answer
    #[error("Unsupported construct: {0}")]
    Unsupported(String),
}

impl TranslationError {
    pub fn unsupported(what: impl Into<String>) -> Self {
        TranslationError::Unsupported(what.into())
    }
}

impl From<TranslationError> for crate::errors::RegexAnalysisError {
    fn from(err: TranslationError) -> Self {
        match err {
            TranslationError::Unsupported(msg) => crate::errors::RegexAnalysisError::Unsupported(msg),
        }
    }
}
