//! Reconstruction of pattern text around excluded elements

mod common;

use common::java;
use pretty_assertions::assert_eq;
use regex_analysis::features::finders::ReconstructionVisitor;
use regex_analysis::IndexRange;

fn reconstruct(pattern: &str, begin: isize, end: isize) -> String {
    ReconstructionVisitor::reconstruct(&java(pattern), IndexRange::new(begin, end))
}

#[test]
fn test_unrelated_range_keeps_everything_after_it() {
    assert_eq!(reconstruct("ab(?=c)d", 0, 1), "b(?=c)d");
}

#[test]
fn test_group_header_wraps_remainder() {
    assert_eq!(reconstruct("(?<=ab)c", 4, 5), "(?<=b)c");
    assert_eq!(reconstruct("(?<name>xy)z", 8, 9), "(?<name>y)z");
}

#[test]
fn test_group_with_nothing_left_disappears() {
    assert_eq!(reconstruct("(a)b", 1, 2), "b");
}

#[test]
fn test_repeated_alternative_is_starred() {
    assert_eq!(reconstruct("(ab|cd)*e", 1, 2), "(b)*e");
    assert_eq!(reconstruct("(a|b)+c", 1, 2), "c");
}

#[test]
fn test_excluded_lookahead_leaves_its_continuation() {
    let regex = java("x(?=ab)a[bc]");
    let lookahead = regex
        .tree()
        .ids()
        .find(|id| regex.node(*id).is_lookaround())
        .expect("lookahead node");

    assert_eq!(regex.text(lookahead), "(?=ab)");
    assert_eq!(
        ReconstructionVisitor::reconstruct(&regex, regex.range(lookahead)),
        "a[bc]"
    );
}

#[test]
fn test_excluding_the_root_yields_nothing() {
    let regex = java("a|b");
    assert_eq!(ReconstructionVisitor::reconstruct(&regex, regex.range(regex.root())), "");
}
