//! Default-walking visitor over the syntax tree

use super::ast::{NodeId, NodeKind};
use super::parse_result::RegexParseResult;

/// Visitor that walks every node reachable from the root
///
/// Implementors override the hooks they care about and call [`walk_children`]
/// to keep descending.
pub trait RegexVisitor {
    fn visit_node(&mut self, regex: &RegexParseResult, id: NodeId) {
        walk_node(self, regex, id);
    }

    fn visit_lookaround(&mut self, regex: &RegexParseResult, id: NodeId) {
        walk_children(self, regex, id);
    }

    fn visit_repetition(&mut self, regex: &RegexParseResult, id: NodeId) {
        walk_children(self, regex, id);
    }

    fn visit_back_reference(&mut self, _regex: &RegexParseResult, _id: NodeId) {}
}

/// Start a walk at the root of `regex`
pub fn visit_regex<V: RegexVisitor + ?Sized>(visitor: &mut V, regex: &RegexParseResult) {
    visitor.visit_node(regex, regex.root());
}

/// Dispatch `id` to the matching hook
pub fn walk_node<V: RegexVisitor + ?Sized>(visitor: &mut V, regex: &RegexParseResult, id: NodeId) {
    match regex.kind(id) {
        NodeKind::Group { .. } if regex.node(id).is_lookaround() => visitor.visit_lookaround(regex, id),
        NodeKind::Repetition { .. } => visitor.visit_repetition(regex, id),
        NodeKind::BackReference(_) => visitor.visit_back_reference(regex, id),
        _ => walk_children(visitor, regex, id),
    }
}

pub fn walk_children<V: RegexVisitor + ?Sized>(visitor: &mut V, regex: &RegexParseResult, id: NodeId) {
    for child in regex.tree().children(id) {
        visitor.visit_node(regex, child);
    }
}
