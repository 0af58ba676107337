//! Automaton view of the syntax tree
//!
//! Every node is also a state of a backtracking automaton. A state knows its
//! continuation (what is matched next), its successors (the states it can move
//! to) and the kind of transition that leads into it. Auxiliary states mark
//! the opening quote, the end of the pattern and the boundaries of repetitions
//! and lookarounds.
//!
//! The view can contain cycles at repetition boundaries; it is navigated
//! through handles and never owns nodes.

use super::ast::{Condition, GroupKind, LookDirection, NodeId, NodeKind, Polarity, RegexTree};
use super::quantifier::Modifier;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AutomatonState {
    Node(NodeId),
    /// Position before the first character of the pattern
    OpeningQuote,
    Final,
    EndOfRepetition(NodeId),
    EndOfLookaround(NodeId),
    StartOfLookbehind(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionType {
    Character,
    Epsilon,
    BackReference,
    LookaroundBacktracking,
    Negation,
}

impl AutomatonState {
    pub fn node(self) -> Option<NodeId> {
        match self {
            AutomatonState::Node(id) => Some(id),
            _ => None,
        }
    }
}

impl RegexTree {
    /// State reached once `state` has been matched
    pub fn continuation(&self, state: AutomatonState) -> AutomatonState {
        match state {
            AutomatonState::Node(id) => self.continuation_of(id),
            AutomatonState::OpeningQuote => self
                .root()
                .map(AutomatonState::Node)
                .unwrap_or(AutomatonState::Final),
            AutomatonState::Final => AutomatonState::Final,
            AutomatonState::EndOfRepetition(rep) => self.continuation_of(rep),
            AutomatonState::EndOfLookaround(look) => self.continuation_of(look),
            AutomatonState::StartOfLookbehind(look) => match self.kind(look) {
                NodeKind::Group {
                    element: Some(element),
                    ..
                } => AutomatonState::Node(*element),
                _ => AutomatonState::EndOfLookaround(look),
            },
        }
    }

    /// States directly reachable from `state`, in the order a backtracking
    /// matcher would try them
    pub fn successors(&self, state: AutomatonState) -> Vec<AutomatonState> {
        let id = match state {
            AutomatonState::Node(id) => id,
            AutomatonState::Final => return Vec::new(),
            AutomatonState::EndOfRepetition(rep) => {
                let NodeKind::Repetition { quantifier, .. } = self.kind(rep) else {
                    return vec![self.continuation(state)];
                };
                if quantifier.maximum_repetitions() == Some(1) {
                    return vec![self.continuation(state)];
                }
                return self.ordered(quantifier.modifier, AutomatonState::Node(rep), self.continuation(state));
            }
            _ => return vec![self.continuation(state)],
        };

        let continuation = self.continuation(state);
        match self.kind(id) {
            NodeKind::Sequence { items } => match items.first() {
                Some(first) => vec![AutomatonState::Node(*first)],
                None => vec![continuation],
            },
            NodeKind::Disjunction { alternatives } => {
                alternatives.iter().map(|a| AutomatonState::Node(*a)).collect()
            }
            NodeKind::Group {
                kind: GroupKind::LookAround { direction, .. },
                element,
                ..
            } => match (direction, element) {
                (LookDirection::Behind, _) => vec![AutomatonState::StartOfLookbehind(id)],
                (LookDirection::Ahead, Some(element)) => vec![AutomatonState::Node(*element)],
                (LookDirection::Ahead, None) => vec![AutomatonState::EndOfLookaround(id)],
            },
            NodeKind::Group { element, .. } => match element {
                Some(element) => vec![AutomatonState::Node(*element)],
                None => vec![continuation],
            },
            NodeKind::Repetition { element, quantifier } => {
                let element = AutomatonState::Node(*element);
                if quantifier.maximum_repetitions() == Some(0) {
                    vec![continuation]
                } else if quantifier.minimum_repetitions() == 0 {
                    self.ordered(quantifier.modifier, element, continuation)
                } else {
                    vec![element]
                }
            }
            NodeKind::ConditionalSubpattern { condition, yes, no } => {
                let mut successors = Vec::new();
                if let Condition::LookAround(look) = condition {
                    successors.push(AutomatonState::Node(*look));
                }
                successors.push(AutomatonState::Node(*yes));
                successors.push(no.map(AutomatonState::Node).unwrap_or(continuation));
                successors
            }
            _ => vec![continuation],
        }
    }

    fn ordered(
        &self,
        modifier: Modifier,
        repeat: AutomatonState,
        exit: AutomatonState,
    ) -> Vec<AutomatonState> {
        match modifier {
            Modifier::Reluctant => vec![exit, repeat],
            Modifier::Greedy | Modifier::Possessive => vec![repeat, exit],
        }
    }

    /// Kind of transition that enters `state`
    pub fn incoming_transition_type(&self, state: AutomatonState) -> TransitionType {
        match state {
            AutomatonState::Node(id) => match self.kind(id) {
                NodeKind::Character { .. }
                | NodeKind::CharacterClass { .. }
                | NodeKind::CharacterRange { .. }
                | NodeKind::CharacterClassUnion { .. }
                | NodeKind::CharacterClassIntersection { .. }
                | NodeKind::Dot
                | NodeKind::EscapedCharacterClass { .. }
                | NodeKind::MiscEscapeSequence => TransitionType::Character,
                NodeKind::BackReference(_) => TransitionType::BackReference,
                _ => TransitionType::Epsilon,
            },
            AutomatonState::StartOfLookbehind(_) => TransitionType::LookaroundBacktracking,
            AutomatonState::EndOfLookaround(look) => match self.node(look).lookaround() {
                Some((_, Polarity::Negative)) => TransitionType::Negation,
                _ => TransitionType::Epsilon,
            },
            _ => TransitionType::Epsilon,
        }
    }
}
