//! Patterns that can never match

use crate::features::finders::ports::RegexIssueReporter;
use crate::features::parsing::domain::RegexParseResult;
use crate::features::smt::application::SatisfiabilityChecker;
use crate::features::smt::domain::MatchType;
use crate::features::smt::ports::SolverContext;
use tracing::debug;

pub const UNSATISFIABLE_REGEX_MESSAGE: &str = "This regular expression can never match any input.";

/// Reports the root of patterns the exact checker proves unsatisfiable
/// under full matching
pub struct UnsatisfiableRegexFinder<'r, C: SolverContext> {
    reporter: &'r mut dyn RegexIssueReporter,
    checker: SatisfiabilityChecker<C>,
}

impl<'r, C: SolverContext> UnsatisfiableRegexFinder<'r, C> {
    pub fn new(reporter: &'r mut dyn RegexIssueReporter, context: C) -> Self {
        Self {
            reporter,
            checker: SatisfiabilityChecker::new(context),
        }
    }

    pub fn find(&mut self, regex: &RegexParseResult) {
        if !self.checker.check(regex, MatchType::Full, true) {
            debug!(regex = regex.source().text(), "regex can never match");
            self.reporter
                .report(regex, regex.root(), UNSATISFIABLE_REGEX_MESSAGE, None, Vec::new());
        }
    }
}
