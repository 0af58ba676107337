//! Automaton view of parsed patterns

mod common;

use common::java;
use pretty_assertions::assert_eq;
use regex_analysis::features::finders::infrastructure::{is_anchored_at_end, only_matches_empty_suffix};
use regex_analysis::features::parsing::{AutomatonState, NodeId, NodeKind, RegexParseResult, TransitionType};

fn items(regex: &RegexParseResult) -> Vec<NodeId> {
    match regex.kind(regex.root()) {
        NodeKind::Sequence { items } => items.clone(),
        other => panic!("expected sequence root, got {:?}", other),
    }
}

fn node(id: NodeId) -> AutomatonState {
    AutomatonState::Node(id)
}

#[test]
fn test_sequence_continuations() {
    let regex = java("ab");
    let tree = regex.tree();
    let [a, b] = items(&regex)[..] else {
        panic!("two items expected");
    };

    assert_eq!(tree.successors(regex.opening_quote()), vec![node(regex.root())]);
    assert_eq!(tree.successors(node(regex.root())), vec![node(a)]);
    assert_eq!(tree.continuation(node(a)), node(b));
    assert_eq!(tree.continuation(node(b)), regex.final_state());
    assert!(tree.successors(regex.final_state()).is_empty());
}

#[test]
fn test_repetition_successor_order_follows_modifier() {
    for (pattern, greedy) in [("a*b", true), ("a*?b", false), ("a*+b", true)] {
        let regex = java(pattern);
        let tree = regex.tree();
        let [rep, b] = items(&regex)[..] else {
            panic!("two items expected");
        };
        let NodeKind::Repetition { element, .. } = regex.kind(rep) else {
            panic!("expected repetition");
        };

        let expected = if greedy {
            vec![node(*element), node(b)]
        } else {
            vec![node(b), node(*element)]
        };
        assert_eq!(tree.successors(node(rep)), expected, "{}", pattern);
        assert_eq!(tree.continuation(node(*element)), AutomatonState::EndOfRepetition(rep));
        assert_eq!(
            tree.successors(AutomatonState::EndOfRepetition(rep)),
            expected.into_iter().map(|s| if s == node(*element) { node(rep) } else { s }).collect::<Vec<_>>()
        );
    }
}

#[test]
fn test_lookbehind_states() {
    let regex = java("(?<!a)b");
    let tree = regex.tree();
    let [look, b] = items(&regex)[..] else {
        panic!("two items expected");
    };
    let NodeKind::Group { element: Some(a), .. } = regex.kind(look) else {
        panic!("expected lookbehind group");
    };

    assert_eq!(tree.successors(node(look)), vec![AutomatonState::StartOfLookbehind(look)]);
    assert_eq!(tree.continuation(AutomatonState::StartOfLookbehind(look)), node(*a));
    assert_eq!(tree.continuation(node(*a)), AutomatonState::EndOfLookaround(look));
    assert_eq!(tree.continuation(AutomatonState::EndOfLookaround(look)), node(b));
    assert_eq!(
        tree.incoming_transition_type(AutomatonState::EndOfLookaround(look)),
        TransitionType::Negation
    );
    assert_eq!(
        tree.incoming_transition_type(AutomatonState::StartOfLookbehind(look)),
        TransitionType::LookaroundBacktracking
    );
    assert_eq!(tree.incoming_transition_type(node(b)), TransitionType::Character);
}

#[test]
fn test_end_anchoring() {
    let anchored = java("a(b|c$)$");
    assert!(is_anchored_at_end(anchored.tree(), anchored.opening_quote()));

    let unanchored = java("a(b$|c)");
    assert!(!is_anchored_at_end(unanchored.tree(), unanchored.opening_quote()));
}

#[test]
fn test_empty_suffix() {
    let regex = java("a(?=b)");
    let [a, look] = items(&regex)[..] else {
        panic!("two items expected");
    };
    assert!(only_matches_empty_suffix(regex.tree(), node(look)));
    assert!(!only_matches_empty_suffix(regex.tree(), node(a)));

    let starred = java("ab*");
    let [_, rep] = items(&starred)[..] else {
        panic!("two items expected");
    };
    assert!(!only_matches_empty_suffix(starred.tree(), node(rep)));
}
