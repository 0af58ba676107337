//! Regex syntax tree
//!
//! Nodes live in an index-addressed arena ([`RegexTree`]). Composite nodes own
//! their children through [`NodeId`] handles; the automaton view
//! (see [`super::automaton`]) only ever borrows these handles.
//!
//! ## Node kinds
//! ```text
//! Character          a, \n, \x41, A
//! Sequence           ab(c)
//! Disjunction        a|b
//! Group              (..) (?:..) (?>..) (?=..) (?!..) (?<=..) (?<!..) (?i) (?i:..)
//! Repetition         a* a+? a{2,}+
//! CharacterClass     [a-z&&[^x]]
//! Dot                .
//! EscapedClass       \d \W \p{Lu}
//! Boundary           ^ $ \b \B \A \G \z \Z
//! BackReference      \1 \k<name> (?P=name)
//! Conditional        (?(1)yes|no)
//! ```

use super::automaton::AutomatonState;
use super::flags::FlagSet;
use super::quantifier::Quantifier;
use crate::shared::models::IndexRange;
use serde::{Deserialize, Serialize};

/// Handle of a node inside its [`RegexTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LookDirection {
    Ahead,
    Behind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupKind {
    Capturing { name: Option<String>, number: u32 },
    /// `(?:..)`, `(?i:..)` and the element-less flag group `(?i)`
    NonCapturing { enabled: FlagSet, disabled: FlagSet },
    Atomic,
    LookAround { direction: LookDirection, polarity: Polarity },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryKind {
    /// `^`
    LineStart,
    /// `$`
    LineEnd,
    /// `\b`
    WordBoundary,
    /// `\B`
    NonWordBoundary,
    /// `\A`
    InputStart,
    /// `\G`
    PreviousMatchEnd,
    /// `\Z`
    InputEndFinalTerminator,
    /// `\z`
    InputEnd,
}

impl BoundaryKind {
    pub fn is_end(self) -> bool {
        matches!(
            self,
            BoundaryKind::LineEnd | BoundaryKind::InputEnd | BoundaryKind::InputEndFinalTerminator
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscapedClassKind {
    /// `\d`
    Digit,
    /// `\w`
    Word,
    /// `\s`
    Whitespace,
    /// `\h`
    HorizontalWhitespace,
    /// `\v`
    VerticalWhitespace,
    /// `\p{..}`
    Property(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackReferenceTarget {
    Number(u32),
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    GroupNumber(u32),
    GroupName(String),
    LookAround(NodeId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Character {
        code_point: u32,
        is_escape: bool,
    },
    Sequence {
        items: Vec<NodeId>,
    },
    Disjunction {
        alternatives: Vec<NodeId>,
    },
    Group {
        kind: GroupKind,
        /// Opening part up to the element, e.g. `(?<=` or `(?<name>`
        header: IndexRange,
        element: Option<NodeId>,
    },
    Repetition {
        element: NodeId,
        quantifier: Quantifier,
    },
    CharacterClass {
        contents: NodeId,
        negated: bool,
    },
    CharacterRange {
        lower: u32,
        upper: u32,
    },
    CharacterClassUnion {
        items: Vec<NodeId>,
    },
    CharacterClassIntersection {
        items: Vec<NodeId>,
    },
    Dot,
    EscapedCharacterClass {
        kind: EscapedClassKind,
        negated: bool,
    },
    Boundary(BoundaryKind),
    /// `\R`, `\X` and similar escapes with no dedicated node
    MiscEscapeSequence,
    BackReference(BackReferenceTarget),
    ConditionalSubpattern {
        condition: Condition,
        yes: NodeId,
        no: Option<NodeId>,
    },
}

/// One syntax element with its source range and flag snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegexNode {
    pub kind: NodeKind,
    pub range: IndexRange,
    pub flags: FlagSet,
}

impl RegexNode {
    pub fn is_lookaround(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Group {
                kind: GroupKind::LookAround { .. },
                ..
            }
        )
    }

    /// Direction and polarity when this node is a lookaround group
    pub fn lookaround(&self) -> Option<(LookDirection, Polarity)> {
        match &self.kind {
            NodeKind::Group {
                kind: GroupKind::LookAround { direction, polarity },
                ..
            } => Some((*direction, *polarity)),
            _ => None,
        }
    }
}

/// Arena owning every node of one parsed regex
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegexTree {
    nodes: Vec<RegexNode>,
    continuations: Vec<AutomatonState>,
    root: Option<NodeId>,
    /// `\Q...\E` blocks, delimiters included
    quoted: Vec<IndexRange>,
}

impl RegexTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: NodeKind, range: IndexRange, flags: FlagSet) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(RegexNode { kind, range, flags });
        self.continuations.push(AutomatonState::Final);
        id
    }

    pub fn node(&self, id: NodeId) -> &RegexNode {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    pub fn range(&self, id: NodeId) -> IndexRange {
        self.nodes[id.index()].range
    }

    pub fn flags(&self, id: NodeId) -> FlagSet {
        self.nodes[id.index()].flags
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    pub(crate) fn add_quoted_block(&mut self, range: IndexRange) {
        self.quoted.push(range);
    }

    pub fn quoted_blocks(&self) -> &[IndexRange] {
        &self.quoted
    }

    /// Does `range` start or end strictly inside a quoted block
    pub fn cuts_quoted_block(&self, range: IndexRange) -> bool {
        self.quoted.iter().any(|block| {
            !range.lower_than(*block) && !range.higher_than(*block) && !range.contains(*block)
        })
    }

    /// Root node, set once parsing has finished
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn continuation_of(&self, id: NodeId) -> AutomatonState {
        self.continuations[id.index()]
    }

    /// Direct children in source order
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        match self.kind(id) {
            NodeKind::Sequence { items }
            | NodeKind::CharacterClassUnion { items }
            | NodeKind::CharacterClassIntersection { items } => items.clone(),
            NodeKind::Disjunction { alternatives } => alternatives.clone(),
            NodeKind::Group { element, .. } => element.iter().copied().collect(),
            NodeKind::Repetition { element, .. } => vec![*element],
            NodeKind::CharacterClass { contents, .. } => vec![*contents],
            NodeKind::ConditionalSubpattern { condition, yes, no } => {
                let mut children = Vec::new();
                if let Condition::LookAround(id) = condition {
                    children.push(*id);
                }
                children.push(*yes);
                children.extend(no.iter().copied());
                children
            }
            _ => Vec::new(),
        }
    }

    /// Wire up the continuation of every node reachable from `root`
    pub(crate) fn link(&mut self, root: NodeId) {
        self.root = Some(root);
        let mut pending = vec![(root, AutomatonState::Final)];
        while let Some((id, continuation)) = pending.pop() {
            self.continuations[id.index()] = continuation;
            match self.kind(id).clone() {
                NodeKind::Sequence { items } => {
                    for (i, item) in items.iter().enumerate() {
                        let next = items
                            .get(i + 1)
                            .map(|n| AutomatonState::Node(*n))
                            .unwrap_or(continuation);
                        pending.push((*item, next));
                    }
                }
                NodeKind::Disjunction { alternatives } => {
                    for alternative in alternatives {
                        pending.push((alternative, continuation));
                    }
                }
                NodeKind::Group {
                    kind: GroupKind::LookAround { .. },
                    element: Some(element),
                    ..
                } => pending.push((element, AutomatonState::EndOfLookaround(id))),
                NodeKind::Group {
                    element: Some(element),
                    ..
                } => pending.push((element, continuation)),
                NodeKind::Repetition { element, .. } => {
                    pending.push((element, AutomatonState::EndOfRepetition(id)))
                }
                NodeKind::ConditionalSubpattern { condition, yes, no } => {
                    if let Condition::LookAround(look) = condition {
                        pending.push((look, AutomatonState::Node(yes)));
                    }
                    pending.push((yes, continuation));
                    if let Some(no) = no {
                        pending.push((no, continuation));
                    }
                }
                NodeKind::CharacterClass { contents, .. } => {
                    self.link_class_items(contents);
                }
                _ => {}
            }
        }
    }

    // class items are not states of the automaton, they end in the final state
    fn link_class_items(&mut self, id: NodeId) {
        self.continuations[id.index()] = AutomatonState::Final;
        for child in self.children(id) {
            self.link_class_items(child);
        }
    }
}
