//! Constraints produced by translating a syntax tree
//!
//! A subtree translates either to a pure regular language
//! ([`Constraint::Regex`]) or, once lookarounds or possessive quantifiers are
//! involved, to a string variable with a boolean formula over it
//! ([`Constraint::String`]). The shape of a string constraint records how it
//! was assembled so that lookaround continuations can be resolved afterwards.

use super::formula::{BooleanFormula, RegexFormula, StringTerm, StringVar};
use crate::features::parsing::domain::LookDirection;

#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    Regex(RegexConstraint),
    String(StringConstraint),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegexConstraint {
    pub formula: RegexFormula,
    /// Literal character this constraint stands for, so adjacent characters
    /// can be batched into one literal
    pub simple_char: Option<char>,
}

impl RegexConstraint {
    pub fn new(formula: RegexFormula) -> Self {
        Self {
            formula,
            simple_char: None,
        }
    }

    pub fn character(c: char) -> Self {
        Self {
            formula: RegexFormula::char(c),
            simple_char: Some(c),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringConstraint {
    /// Term standing for the text matched by the subtree
    pub var: StringTerm,
    pub formula: BooleanFormula,
    pub shape: StringShape,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StringShape {
    /// Variable constrained by a regex membership
    Simple,
    Concatenation(Vec<StringConstraint>),
    Disjunction(Vec<StringConstraint>),
    /// Zero-width assertion (or possessive repetition) whose `continuation`
    /// variable must be bound to what surrounds it
    Lookaround {
        direction: LookDirection,
        continuation: StringVar,
    },
}

impl Constraint {
    pub fn regex(formula: RegexFormula) -> Self {
        Constraint::Regex(RegexConstraint::new(formula))
    }

    pub fn is_regex(&self) -> bool {
        matches!(self, Constraint::Regex(_))
    }
}
