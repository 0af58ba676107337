//! Sub-patterns made unreachable by a preceding possessive repetition
//!
//! An open-ended possessive repetition consumes every further match of its
//! element and never gives it back. If every string the rest of the pattern
//! can match starts with a word of the element, the element following the
//! repetition can never match.

use super::intersection::PatternIntersection;
use super::reconstruction::ReconstructionVisitor;
use crate::features::automata::AutomatonLimits;
use crate::features::finders::domain::RegexIssueLocation;
use crate::features::finders::ports::RegexIssueReporter;
use crate::features::parsing::domain::{
    visit_regex, walk_children, AutomatonState, NodeId, NodeKind, RegexParseResult, RegexVisitor,
};
use tracing::debug;

pub const POSSESSIVE_CONTINUATION_MESSAGE: &str =
    "Change this impossible to match sub-pattern that conflicts with the previous possessive quantifier.";
pub const PREVIOUS_REPETITION_MESSAGE: &str = "Previous possessive repetition";

pub struct PossessiveContinuationFinder<'r> {
    reporter: &'r mut dyn RegexIssueReporter,
    limits: AutomatonLimits,
    intersection: Option<PatternIntersection>,
}

impl<'r> PossessiveContinuationFinder<'r> {
    pub fn new(reporter: &'r mut dyn RegexIssueReporter, limits: AutomatonLimits) -> Self {
        Self {
            reporter,
            limits,
            intersection: None,
        }
    }

    pub fn find(&mut self, regex: &RegexParseResult) {
        self.intersection = PatternIntersection::for_regex(regex, self.limits);
        visit_regex(self, regex);
    }

    fn always_fails(&self, regex: &RegexParseResult, repetition: NodeId) -> bool {
        let NodeKind::Repetition { element, quantifier } = regex.kind(repetition) else {
            return false;
        };
        if !quantifier.is_possessive() || !quantifier.is_open_ended() {
            return false;
        }
        let Some(intersection) = &self.intersection else {
            return false;
        };
        let element = regex.pattern_text(*element);
        // an element matching the empty string lets the repetition stop anywhere
        if intersection.matches_empty(&element) != Ok(false) {
            return false;
        }
        let rest = ReconstructionVisitor::reconstruct(regex, regex.range(repetition));
        !intersection.intersects(&element, &rest, true, false, false, true)
    }
}

/// First syntax element matched after `repetition` has finished
///
/// Lookaround ends and optional enclosing repetitions break the chain: what
/// follows them is not necessarily preceded by the repetition.
fn following_element(regex: &RegexParseResult, repetition: NodeId) -> Option<NodeId> {
    let tree = regex.tree();
    let mut state = tree.continuation(AutomatonState::Node(repetition));
    loop {
        match state {
            AutomatonState::Node(id) => return Some(id),
            AutomatonState::EndOfRepetition(outer) => match tree.kind(outer) {
                NodeKind::Repetition { quantifier, .. } if quantifier.minimum_repetitions() > 0 => {
                    state = tree.continuation(state);
                }
                _ => return None,
            },
            _ => return None,
        }
    }
}

/// `repetition` sits in one branch of an alternation that closes before
/// `continuation`, so the other branches reach it as well
fn bypassed_by_alternative(regex: &RegexParseResult, repetition: NodeId, continuation: NodeId) -> bool {
    let inner = regex.range(repetition);
    let outer = regex.range(continuation);
    regex.tree().ids().any(|id| {
        matches!(
            regex.kind(id),
            NodeKind::Disjunction { .. } | NodeKind::ConditionalSubpattern { .. }
        ) && regex.range(id).contains(inner)
            && !regex.range(id).contains(outer)
    })
}

impl RegexVisitor for PossessiveContinuationFinder<'_> {
    fn visit_repetition(&mut self, regex: &RegexParseResult, id: NodeId) {
        let continuation = following_element(regex, id)
            .filter(|continuation| !bypassed_by_alternative(regex, id, *continuation));
        if let Some(continuation) = continuation {
            if self.always_fails(regex, id) {
                debug!(
                    repetition = regex.text(id),
                    continuation = regex.text(continuation),
                    "continuation conflicts with possessive repetition"
                );
                self.reporter.report(
                    regex,
                    continuation,
                    POSSESSIVE_CONTINUATION_MESSAGE,
                    None,
                    vec![RegexIssueLocation::new(regex.range(id), PREVIOUS_REPETITION_MESSAGE)],
                );
            }
        }
        walk_children(self, regex, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::finders::domain::RegexIssue;
    use crate::features::parsing::{parse_regex, RegexSource};
    use crate::shared::models::IndexRange;

    fn find(pattern: &str) -> Vec<RegexIssue> {
        let regex = parse_regex(RegexSource::java(pattern)).expect("valid regex");
        let mut issues: Vec<RegexIssue> = Vec::new();
        PossessiveContinuationFinder::new(&mut issues, AutomatonLimits::default()).find(&regex);
        issues
    }

    #[test]
    fn test_disjoint_continuation_is_fine() {
        assert!(find("x*+y").is_empty());
        assert!(find("([a-y])++z").is_empty());
        assert!(find("(xy)++x").is_empty());
    }

    #[test]
    fn test_swallowed_continuation_is_reported() {
        let issues = find("[a-z]++z");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].text, "z");
        assert_eq!(issues[0].message, POSSESSIVE_CONTINUATION_MESSAGE);
        assert_eq!(
            issues[0].secondaries,
            vec![RegexIssueLocation::new(IndexRange::new(0, 7), PREVIOUS_REPETITION_MESSAGE)]
        );
        assert_eq!(find("x++x").len(), 1);
        assert_eq!(find("[0-9]++[13579]").len(), 1);
    }

    #[test]
    fn test_non_possessive_or_bounded_is_ignored() {
        assert!(find("x+x").is_empty());
        assert!(find("x{1,3}+x").is_empty());
    }

    #[test]
    fn test_no_following_element() {
        assert!(find("x++").is_empty());
        assert!(find("(?=x++)x").is_empty());
        assert!(find("(x++)*x").is_empty());
    }

    #[test]
    fn test_continuation_reachable_through_other_alternative() {
        assert!(find("(?:[ab]*|[ab]++)a").is_empty());
        assert!(find("(?:c|[ab]++)a").is_empty());
        assert_eq!(find("(?:[ab]++)a").len(), 1);
        assert_eq!(find("(?:c|[ab]++a)").len(), 1);
    }

    #[test]
    fn test_quoted_element_stays_literal() {
        assert!(find("a\\Q.\\E++a").is_empty());
        assert_eq!(find("\\Q.\\E++\\Q.\\E").len(), 1);
    }

    #[test]
    fn test_nullable_element_is_ignored() {
        assert!(find("(a?)*+b").is_empty());
        assert!(find("(a?)*+a").is_empty());
    }
}
