//! Outcome of a successful parse

use super::ast::{NodeId, NodeKind, RegexNode, RegexTree};
use super::automaton::AutomatonState;
use super::source::RegexSource;
use crate::shared::models::IndexRange;
use std::borrow::Cow;

/// Parsed regex: the source, the arena of nodes and the root node
///
/// The opening quote and the final state are the auxiliary automaton states
/// [`AutomatonState::OpeningQuote`] and [`AutomatonState::Final`].
#[derive(Debug, Clone)]
pub struct RegexParseResult {
    source: RegexSource,
    tree: RegexTree,
    root: NodeId,
}

impl RegexParseResult {
    pub(crate) fn new(source: RegexSource, mut tree: RegexTree, root: NodeId) -> Self {
        tree.link(root);
        Self { source, tree, root }
    }

    pub fn source(&self) -> &RegexSource {
        &self.source
    }

    pub fn tree(&self) -> &RegexTree {
        &self.tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn opening_quote(&self) -> AutomatonState {
        AutomatonState::OpeningQuote
    }

    pub fn final_state(&self) -> AutomatonState {
        AutomatonState::Final
    }

    pub fn node(&self, id: NodeId) -> &RegexNode {
        self.tree.node(id)
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        self.tree.kind(id)
    }

    pub fn range(&self, id: NodeId) -> IndexRange {
        self.tree.range(id)
    }

    /// Source text of a node
    pub fn text(&self, id: NodeId) -> &str {
        self.text_of_range(self.tree.range(id))
    }

    pub fn text_of_range(&self, range: IndexRange) -> &str {
        range.slice(self.source.text()).unwrap_or("")
    }

    /// Text of a node that parses back to the same element on its own
    ///
    /// The source text unless the node starts or ends inside a `\Q...\E`
    /// block; quoted characters are then re-quoted one by one.
    pub fn pattern_text(&self, id: NodeId) -> Cow<'_, str> {
        if !self.tree.cuts_quoted_block(self.range(id)) {
            return Cow::Borrowed(self.text(id));
        }
        let mut out = String::new();
        self.write_pattern_text(id, &mut out);
        Cow::Owned(out)
    }

    fn write_pattern_text(&self, id: NodeId, out: &mut String) {
        if !self.tree.cuts_quoted_block(self.range(id)) {
            out.push_str(self.text(id));
            return;
        }
        match self.kind(id) {
            NodeKind::Character { code_point, .. } => {
                if let Some(c) = char::from_u32(*code_point) {
                    out.push_str("\\Q");
                    out.push(c);
                    out.push_str("\\E");
                }
            }
            NodeKind::Sequence { items } => {
                for item in items {
                    self.write_pattern_text(*item, out);
                }
            }
            NodeKind::Disjunction { alternatives } => {
                for (i, alternative) in alternatives.iter().enumerate() {
                    if i > 0 {
                        out.push('|');
                    }
                    self.write_pattern_text(*alternative, out);
                }
            }
            NodeKind::Repetition { element, quantifier } => {
                self.write_pattern_text(*element, out);
                out.push_str(self.text_of_range(quantifier.range));
            }
            _ => out.push_str(self.text(id)),
        }
    }

    /// Source range of an automaton state; auxiliary states other than the
    /// opening quote have none
    pub fn state_range(&self, state: AutomatonState) -> Option<IndexRange> {
        match state {
            AutomatonState::Node(id) => Some(self.range(id)),
            AutomatonState::OpeningQuote => Some(IndexRange::opening_quote()),
            _ => None,
        }
    }

    /// Source text of an automaton state
    ///
    /// Fails for the opening quote and the auxiliary states, which do not
    /// correspond to any text.
    pub fn state_text(&self, state: AutomatonState) -> Result<&str, String> {
        match state {
            AutomatonState::Node(id) => Ok(self.text(id)),
            other => Err(format!("{:?} has no source text", other)),
        }
    }
}
