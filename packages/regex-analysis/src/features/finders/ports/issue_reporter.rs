//! Issue reporting port

use crate::features::finders::domain::{RegexIssue, RegexIssueLocation};
use crate::features::parsing::domain::{NodeId, RegexParseResult};

/// Sink for findings
///
/// Finders report on a syntax element of `regex`; the reporter decides how
/// to present it.
pub trait RegexIssueReporter {
    fn report(
        &mut self,
        regex: &RegexParseResult,
        element: NodeId,
        message: &str,
        cost: Option<f64>,
        secondaries: Vec<RegexIssueLocation>,
    );
}

/// Collects issues in memory
impl RegexIssueReporter for Vec<RegexIssue> {
    fn report(
        &mut self,
        regex: &RegexParseResult,
        element: NodeId,
        message: &str,
        cost: Option<f64>,
        secondaries: Vec<RegexIssueLocation>,
    ) {
        self.push(RegexIssue {
            range: regex.range(element),
            text: regex.text(element).to_string(),
            message: message.to_string(),
            cost,
            secondaries,
        });
    }
}
