//! Repetition quantifiers

use crate::shared::models::IndexRange;
use serde::{Deserialize, Serialize};

/// How a repetition backtracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    Greedy,
    Reluctant,
    Possessive,
}

/// Single-character quantifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimpleKind {
    Star,
    Plus,
    QuestionMark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantifierKind {
    Simple(SimpleKind),
    /// `{min}`, `{min,}` or `{min,max}`
    Curly {
        min: u32,
        max: Option<u32>,
        fixed: bool,
    },
}

/// Quantifier of a repetition, e.g. `*`, `{2,5}?` or `++`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quantifier {
    pub range: IndexRange,
    pub modifier: Modifier,
    pub kind: QuantifierKind,
}

impl Quantifier {
    pub fn simple(range: IndexRange, kind: SimpleKind, modifier: Modifier) -> Self {
        Self {
            range,
            modifier,
            kind: QuantifierKind::Simple(kind),
        }
    }

    pub fn curly(range: IndexRange, min: u32, max: Option<u32>, fixed: bool, modifier: Modifier) -> Self {
        Self {
            range,
            modifier,
            kind: QuantifierKind::Curly { min, max, fixed },
        }
    }

    pub fn minimum_repetitions(&self) -> u32 {
        match self.kind {
            QuantifierKind::Simple(SimpleKind::Plus) => 1,
            QuantifierKind::Simple(_) => 0,
            QuantifierKind::Curly { min, .. } => min,
        }
    }

    /// `None` when the quantifier is unbounded
    pub fn maximum_repetitions(&self) -> Option<u32> {
        match self.kind {
            QuantifierKind::Simple(SimpleKind::QuestionMark) => Some(1),
            QuantifierKind::Simple(_) => None,
            QuantifierKind::Curly { max, .. } => max,
        }
    }

    /// Exact repetition count written as `{n}`
    pub fn is_fixed(&self) -> bool {
        matches!(self.kind, QuantifierKind::Curly { fixed: true, .. })
    }

    pub fn is_open_ended(&self) -> bool {
        self.maximum_repetitions().is_none()
    }

    pub fn is_possessive(&self) -> bool {
        self.modifier == Modifier::Possessive
    }

    pub fn is_star(&self) -> bool {
        self.minimum_repetitions() == 0 && self.is_open_ended()
    }
}
