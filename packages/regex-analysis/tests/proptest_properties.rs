//! Property-based tests
//!
//! Invariants over patterns assembled from lookarounds, possessive and
//! plain fragments:
//! - Reconstruction without exclusion reproduces the source, including
//!   quoted blocks, escapes, nested classes and comments mode
//! - Full-match satisfiability implies partial-match satisfiability
//! - Independent checkers agree

mod common;

use common::java;
use proptest::prelude::*;
use regex_analysis::features::finders::ReconstructionVisitor;
use regex_analysis::features::smt::{AutomatonSolverContext, MatchType, SatisfiabilityChecker};
use regex_analysis::{IndexRange, RegexAnalyzer};

const FRAGMENTS: &[&str] = &[
    "a", "b", "ab", "[ab]", ".", "a*", "b+", "(a|b)", "(?=a)", "(?!b)", "(?<=a)", "(?<!b)", "a++",
    "[ab]*+",
];

/// Fragments exercising the rest of the syntax; `\\Qab` is left unterminated
const SYNTAX_FRAGMENTS: &[&str] = &[
    "\\Q.\\E",
    "\\Q*\\E+",
    "\\Qa|b\\E",
    "\\Qab",
    "\\.",
    "\\d",
    "\\W+",
    "\\x41",
    "\\u0062",
    "\\t",
    "\\p{L}",
    "\\b",
    "[a&&[b]]",
    "[^\\Q]\\E]",
    "[a-c&&[^b]]",
    "(?i)",
    "(?-i:a)",
    "(?x)",
    " a # note\n",
    "(?<n>a)",
    "(?>ab)",
    "a{2,3}",
    "x{2}+",
    "[]a]",
    "$",
];

fn pattern() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 1..5).prop_map(|parts| parts.concat())
}

fn syntax_pattern() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![prop::sample::select(FRAGMENTS), prop::sample::select(SYNTAX_FRAGMENTS)];
    prop::collection::vec(fragment, 1..6).prop_map(|parts| parts.concat())
}

fn check(pattern: &str, match_type: MatchType, default_answer: bool) -> bool {
    let mut checker = SatisfiabilityChecker::new(AutomatonSolverContext::default());
    checker.check(&java(pattern), match_type, default_answer)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_reconstruction_without_exclusion_is_verbatim(pattern in pattern()) {
        let regex = java(&pattern);
        prop_assert_eq!(ReconstructionVisitor::reconstruct(&regex, IndexRange::none()), pattern);
    }

    #[test]
    fn prop_reconstruction_of_full_syntax_is_verbatim(pattern in syntax_pattern()) {
        let regex = java(&pattern);
        prop_assert_eq!(ReconstructionVisitor::reconstruct(&regex, IndexRange::none()), pattern);
    }

    #[test]
    fn prop_analysis_accepts_full_syntax(pattern in syntax_pattern()) {
        prop_assert!(RegexAnalyzer::default().analyze(&pattern).is_ok(), "{}", pattern);
    }

    #[test]
    fn prop_full_match_implies_partial_match(pattern in pattern()) {
        // Invariant: every full match is also a partial match
        if check(&pattern, MatchType::Full, false) {
            prop_assert!(check(&pattern, MatchType::Partial, true), "{}", pattern);
        }
    }

    #[test]
    fn prop_independent_checkers_agree(pattern in pattern()) {
        let first = check(&pattern, MatchType::Partial, true);
        let second = check(&pattern, MatchType::Partial, true);
        prop_assert_eq!(first, second);

        let mut shared = SatisfiabilityChecker::new(AutomatonSolverContext::default());
        let regex = java(&pattern);
        prop_assert_eq!(shared.check(&regex, MatchType::Partial, true), first);
        prop_assert_eq!(shared.check(&regex, MatchType::Partial, true), first);
    }

    #[test]
    fn prop_plain_patterns_are_satisfiable(
        parts in prop::collection::vec(prop::sample::select(&["a", "[ab]", ".", "a*", "(a|b)"][..]), 1..6)
    ) {
        let pattern = parts.concat();
        prop_assert!(check(&pattern, MatchType::Full, false), "{}", pattern);
    }
}
