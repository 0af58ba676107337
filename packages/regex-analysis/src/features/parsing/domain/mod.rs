//! Parsing domain: syntax tree, automaton view, flags and dialects

pub mod ast;
pub mod automaton;
pub mod flags;
pub mod parse_result;
pub mod quantifier;
pub mod source;
pub mod visitor;

pub use ast::{
    BackReferenceTarget, BoundaryKind, Condition, EscapedClassKind, GroupKind, LookDirection,
    NodeId, NodeKind, Polarity, RegexNode, RegexTree,
};
pub use automaton::{AutomatonState, TransitionType};
pub use flags::FlagSet;
pub use parse_result::RegexParseResult;
pub use quantifier::{Modifier, Quantifier, QuantifierKind, SimpleKind};
pub use source::{Dialect, RegexFeature, RegexSource};
pub use visitor::{visit_regex, walk_children, walk_node, RegexVisitor};
