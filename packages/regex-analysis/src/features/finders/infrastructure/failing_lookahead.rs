//! Lookaheads that can never succeed
//!
//! A lookahead fails everywhere when its language is inconsistent with
//! whatever the rest of the pattern can match at that position:
//! - positive: no word of the lookahead is a prefix of a continuation (or,
//!   for partial matches, no continuation is a prefix of a word)
//! - negative: every continuation starts with a word of the lookahead

use super::intersection::PatternIntersection;
use super::reconstruction::ReconstructionVisitor;
use crate::features::automata::AutomatonLimits;
use crate::features::finders::ports::RegexIssueReporter;
use crate::features::parsing::domain::{
    visit_regex, walk_children, LookDirection, NodeId, NodeKind, Polarity, RegexParseResult, RegexVisitor,
};
use crate::features::smt::domain::MatchType;
use tracing::debug;

pub const FAILING_LOOKAHEAD_MESSAGE: &str = "Remove or fix this lookahead assertion that can never be true.";

pub struct FailingLookaheadFinder<'r> {
    reporter: &'r mut dyn RegexIssueReporter,
    match_type: MatchType,
    limits: AutomatonLimits,
    intersection: Option<PatternIntersection>,
}

impl<'r> FailingLookaheadFinder<'r> {
    pub fn new(reporter: &'r mut dyn RegexIssueReporter, match_type: MatchType, limits: AutomatonLimits) -> Self {
        Self {
            reporter,
            match_type,
            limits,
            intersection: None,
        }
    }

    pub fn find(&mut self, regex: &RegexParseResult) {
        self.intersection = PatternIntersection::for_regex(regex, self.limits);
        visit_regex(self, regex);
    }

    fn always_fails(&self, regex: &RegexParseResult, lookahead: NodeId, polarity: Polarity) -> bool {
        let Some(intersection) = &self.intersection else {
            return false;
        };
        let NodeKind::Group { element, .. } = regex.kind(lookahead) else {
            return false;
        };
        let asserted = element.map(|e| regex.pattern_text(e)).unwrap_or_default();
        let rest = ReconstructionVisitor::reconstruct(regex, regex.range(lookahead));
        match polarity {
            Polarity::Negative => !intersection.intersects(&asserted, &rest, true, false, false, true),
            Polarity::Positive => {
                !intersection.intersects(&asserted, &rest, true, !self.match_type.is_full(), true, false)
            }
        }
    }
}

impl RegexVisitor for FailingLookaheadFinder<'_> {
    fn visit_lookaround(&mut self, regex: &RegexParseResult, id: NodeId) {
        if let Some((LookDirection::Ahead, polarity)) = regex.node(id).lookaround() {
            if self.always_fails(regex, id, polarity) {
                debug!(lookahead = regex.text(id), "lookahead can never succeed");
                self.reporter.report(regex, id, FAILING_LOOKAHEAD_MESSAGE, None, Vec::new());
            }
        }
        walk_children(self, regex, id);
    }
}
