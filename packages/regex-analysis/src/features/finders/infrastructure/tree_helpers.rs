//! Path properties over the automaton view

use crate::features::parsing::domain::{AutomatonState, NodeKind, RegexTree, TransitionType};
use rustc_hash::FxHashSet;

/// Every path from `start` to the final state passes an end boundary
/// (`$`, `\z` or `\Z`)
pub fn is_anchored_at_end(tree: &RegexTree, start: AutomatonState) -> bool {
    anchored_at_end(tree, start, &mut FxHashSet::default())
}

fn anchored_at_end(
    tree: &RegexTree,
    state: AutomatonState,
    visited: &mut FxHashSet<AutomatonState>,
) -> bool {
    if is_end_boundary(tree, state) {
        return true;
    }
    if state == AutomatonState::Final {
        return false;
    }
    visited.insert(state);
    for successor in tree.successors(state) {
        if !visited.contains(&successor) && !anchored_at_end(tree, successor, visited) {
            return false;
        }
    }
    true
}

pub fn is_end_boundary(tree: &RegexTree, state: AutomatonState) -> bool {
    match state {
        AutomatonState::Node(id) => matches!(tree.kind(id), NodeKind::Boundary(kind) if kind.is_end()),
        _ => false,
    }
}

/// Every path from `start` to the final state consumes nothing; lookarounds
/// are stepped over
pub fn only_matches_empty_suffix(tree: &RegexTree, start: AutomatonState) -> bool {
    empty_suffix(tree, start, &mut FxHashSet::default())
}

fn empty_suffix(tree: &RegexTree, state: AutomatonState, visited: &mut FxHashSet<AutomatonState>) -> bool {
    if state == AutomatonState::Final || !visited.insert(state) {
        return true;
    }
    if let AutomatonState::Node(id) = state {
        if tree.node(id).is_lookaround() {
            return empty_suffix(tree, tree.continuation(state), visited);
        }
    }
    if tree.incoming_transition_type(state) != TransitionType::Epsilon {
        return false;
    }
    tree.successors(state)
        .into_iter()
        .all(|successor| empty_suffix(tree, successor, visited))
}
