//! Finder infrastructure: reconstruction, automaton intersection, finders

pub mod failing_lookahead;
pub mod intersection;
pub mod possessive_continuation;
pub mod reconstruction;
pub mod tree_helpers;
pub mod unsatisfiable_regex;

pub use failing_lookahead::{FailingLookaheadFinder, FAILING_LOOKAHEAD_MESSAGE};
pub use intersection::PatternIntersection;
pub use possessive_continuation::{
    PossessiveContinuationFinder, POSSESSIVE_CONTINUATION_MESSAGE, PREVIOUS_REPETITION_MESSAGE,
};
pub use reconstruction::ReconstructionVisitor;
pub use tree_helpers::{is_anchored_at_end, is_end_boundary, only_matches_empty_suffix};
pub use unsatisfiable_regex::{UnsatisfiableRegexFinder, UNSATISFIABLE_REGEX_MESSAGE};
