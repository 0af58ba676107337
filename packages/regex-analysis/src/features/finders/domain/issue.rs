//! Findings reported on regex syntax elements

use crate::shared::models::IndexRange;
use serde::{Deserialize, Serialize};

/// Secondary location attached to an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegexIssueLocation {
    pub range: IndexRange,
    pub message: String,
}

impl RegexIssueLocation {
    pub fn new(range: IndexRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

/// One finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegexIssue {
    /// Range of the offending element in the pattern
    pub range: IndexRange,
    /// Text of the offending element
    pub text: String,
    pub message: String,
    /// Remediation cost, when the finder provides one
    pub cost: Option<f64>,
    pub secondaries: Vec<RegexIssueLocation>,
}
