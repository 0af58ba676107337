//! Pattern text around an excluded element
//!
//! Rebuilds the part of a pattern that can follow an excluded element, as a
//! standalone pattern:
//! - elements entirely after the excluded range are copied verbatim
//! - sequence items before it are dropped
//! - of a disjunction only the alternative containing it is kept
//! - groups keep their header and `)` around non-empty output
//! - a repetition containing it becomes `*`-repeated remainder
//!
//! Excluding [`IndexRange::none`] reproduces the source. Copied elements use
//! [`RegexParseResult::pattern_text`], so quoted characters stay literal.

use crate::features::parsing::domain::{NodeId, NodeKind, RegexParseResult};
use crate::shared::models::IndexRange;

pub struct ReconstructionVisitor<'a> {
    regex: &'a RegexParseResult,
    exclude: IndexRange,
    out: String,
}

impl<'a> ReconstructionVisitor<'a> {
    pub fn new(regex: &'a RegexParseResult, exclude: IndexRange) -> Self {
        Self {
            regex,
            exclude,
            out: String::new(),
        }
    }

    /// Reconstruct from the root
    pub fn reconstruct(regex: &'a RegexParseResult, exclude: IndexRange) -> String {
        let mut visitor = Self::new(regex, exclude);
        visitor.visit(regex.root());
        visitor.result()
    }

    pub fn result(self) -> String {
        self.out
    }

    pub fn visit(&mut self, id: NodeId) {
        let range = self.regex.range(id);
        if range.higher_than(self.exclude) {
            self.out.push_str(&self.regex.pattern_text(id));
        } else if range != self.exclude {
            self.visit_inner(id);
        }
    }

    fn visit_inner(&mut self, id: NodeId) {
        let regex = self.regex;
        let exclude = self.exclude;
        match regex.kind(id) {
            NodeKind::Sequence { items } => {
                let mut remaining = items
                    .iter()
                    .filter(|item| !regex.range(**item).lower_than(exclude));
                if let Some(first) = remaining.next() {
                    let rest: Vec<NodeId> = remaining.copied().collect();
                    self.visit(*first);
                    for item in rest {
                        self.out.push_str(&regex.pattern_text(item));
                    }
                }
            }
            NodeKind::Disjunction { alternatives } => {
                let containing = alternatives
                    .iter()
                    .find(|alternative| regex.range(**alternative).contains(exclude));
                if let Some(alternative) = containing {
                    self.visit(*alternative);
                }
            }
            NodeKind::Group { header, element, .. } => {
                if let Some(element) = element {
                    let mark = self.out.len();
                    self.visit(*element);
                    if self.out.len() != mark {
                        self.out.insert_str(mark, regex.text_of_range(*header));
                        self.out.push(')');
                    }
                }
            }
            NodeKind::Repetition { element, .. } => {
                let mark = self.out.len();
                self.visit(*element);
                if self.out.len() != mark {
                    self.out.push('*');
                }
            }
            _ => self.out.push_str(&regex.pattern_text(id)),
        }
    }
}
