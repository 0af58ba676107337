//! Formula algebra submitted to the satisfiability oracle
//!
//! Three layers:
//! - [`RegexFormula`]: regular languages over Unicode scalar values
//! - [`StringTerm`]: string variables and their concatenations
//! - [`BooleanFormula`]: membership, prefix/suffix/equality atoms and
//!   boolean connectives, including universal quantification over a string
//!   variable
//!
//! Formulas are plain values; building one never talks to a solver.

use std::fmt;

/// Largest Unicode code point
pub const MAX_CODE_POINT: u32 = 0x10FFFF;

/// Regular language over code points
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegexFormula {
    /// Empty language
    None,
    /// Every string
    All,
    /// Every single character
    AllChar,
    /// Exactly one string; the empty literal is the empty-string language
    Literal(String),
    /// Single characters in `lower..=upper`
    Range(u32, u32),
    Union(Vec<RegexFormula>),
    Intersection(Vec<RegexFormula>),
    Complement(Box<RegexFormula>),
    Difference(Box<RegexFormula>, Box<RegexFormula>),
    Concat(Vec<RegexFormula>),
    /// Kleene star
    Closure(Box<RegexFormula>),
    /// One or more
    Cross(Box<RegexFormula>),
    Optional(Box<RegexFormula>),
    /// Exactly `n` copies
    Times(Box<RegexFormula>, u32),
}

impl RegexFormula {
    pub fn epsilon() -> Self {
        RegexFormula::Literal(String::new())
    }

    pub fn literal(text: impl Into<String>) -> Self {
        RegexFormula::Literal(text.into())
    }

    pub fn char(c: char) -> Self {
        RegexFormula::Literal(c.to_string())
    }

    pub fn range(lower: u32, upper: u32) -> Self {
        RegexFormula::Range(lower, upper)
    }

    pub fn union(items: Vec<RegexFormula>) -> Self {
        match items.len() {
            0 => RegexFormula::None,
            1 => items.into_iter().next().unwrap_or(RegexFormula::None),
            _ => RegexFormula::Union(items),
        }
    }

    pub fn intersection(items: Vec<RegexFormula>) -> Self {
        match items.len() {
            0 => RegexFormula::All,
            1 => items.into_iter().next().unwrap_or(RegexFormula::All),
            _ => RegexFormula::Intersection(items),
        }
    }

    pub fn concat(items: Vec<RegexFormula>) -> Self {
        match items.len() {
            0 => RegexFormula::epsilon(),
            1 => items.into_iter().next().unwrap_or_else(RegexFormula::epsilon),
            _ => RegexFormula::Concat(items),
        }
    }

    pub fn complement(self) -> Self {
        RegexFormula::Complement(Box::new(self))
    }

    pub fn difference(self, other: RegexFormula) -> Self {
        RegexFormula::Difference(Box::new(self), Box::new(other))
    }

    pub fn closure(self) -> Self {
        RegexFormula::Closure(Box::new(self))
    }

    pub fn cross(self) -> Self {
        RegexFormula::Cross(Box::new(self))
    }

    pub fn optional(self) -> Self {
        RegexFormula::Optional(Box::new(self))
    }

    pub fn times(self, n: u32) -> Self {
        RegexFormula::Times(Box::new(self), n)
    }

    /// Language of every string starting with a word of `self`
    pub fn followed_by_anything(self) -> Self {
        RegexFormula::concat(vec![self, RegexFormula::All])
    }

    /// Language of every string ending with a word of `self`
    pub fn preceded_by_anything(self) -> Self {
        RegexFormula::concat(vec![RegexFormula::All, self])
    }
}

/// String variable; names are handed out by the checker's formula manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StringVar(pub u32);

impl fmt::Display for StringVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StringTerm {
    Var(StringVar),
    Concat(Vec<StringTerm>),
}

impl StringTerm {
    pub fn var(var: StringVar) -> Self {
        StringTerm::Var(var)
    }

    pub fn concat(items: Vec<StringTerm>) -> Self {
        if items.len() == 1 {
            if let Some(item) = items.into_iter().next() {
                return item;
            }
            return StringTerm::Concat(Vec::new());
        }
        StringTerm::Concat(items)
    }

    /// Variables of this term in left-to-right order
    pub fn flatten(&self) -> Vec<StringVar> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut Vec<StringVar>) {
        match self {
            StringTerm::Var(v) => out.push(*v),
            StringTerm::Concat(items) => items.iter().for_each(|i| i.flatten_into(out)),
        }
    }
}

impl From<StringVar> for StringTerm {
    fn from(var: StringVar) -> Self {
        StringTerm::Var(var)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BooleanFormula {
    True,
    False,
    /// `term ∈ L(regex)`
    InRegex(StringTerm, RegexFormula),
    /// `prefix` is a prefix of `of`
    Prefix(StringTerm, StringTerm),
    /// `suffix` is a suffix of `of`
    Suffix(StringTerm, StringTerm),
    Equal(StringTerm, StringTerm),
    And(Vec<BooleanFormula>),
    Or(Vec<BooleanFormula>),
    Not(Box<BooleanFormula>),
    Implies(Box<BooleanFormula>, Box<BooleanFormula>),
    ForAll(StringVar, Box<BooleanFormula>),
}

impl BooleanFormula {
    pub fn in_regex(term: impl Into<StringTerm>, regex: RegexFormula) -> Self {
        BooleanFormula::InRegex(term.into(), regex)
    }

    pub fn prefix(prefix: impl Into<StringTerm>, of: impl Into<StringTerm>) -> Self {
        BooleanFormula::Prefix(prefix.into(), of.into())
    }

    pub fn suffix(suffix: impl Into<StringTerm>, of: impl Into<StringTerm>) -> Self {
        BooleanFormula::Suffix(suffix.into(), of.into())
    }

    pub fn equal(left: impl Into<StringTerm>, right: impl Into<StringTerm>) -> Self {
        BooleanFormula::Equal(left.into(), right.into())
    }

    /// Conjunction, flattening nested conjunctions and dropping `True`
    pub fn and(items: Vec<BooleanFormula>) -> Self {
        let mut flat = Vec::new();
        for item in items {
            match item {
                BooleanFormula::True => {}
                BooleanFormula::And(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => BooleanFormula::True,
            1 => flat.pop().unwrap_or(BooleanFormula::True),
            _ => BooleanFormula::And(flat),
        }
    }

    pub fn or(items: Vec<BooleanFormula>) -> Self {
        match items.len() {
            0 => BooleanFormula::False,
            1 => items.into_iter().next().unwrap_or(BooleanFormula::False),
            _ => BooleanFormula::Or(items),
        }
    }

    pub fn not(self) -> Self {
        BooleanFormula::Not(Box::new(self))
    }

    pub fn implies(self, then: BooleanFormula) -> Self {
        BooleanFormula::Implies(Box::new(self), Box::new(then))
    }

    pub fn for_all(var: StringVar, body: BooleanFormula) -> Self {
        BooleanFormula::ForAll(var, Box::new(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_flattens() {
        let a = BooleanFormula::in_regex(StringVar(0), RegexFormula::All);
        let b = BooleanFormula::in_regex(StringVar(1), RegexFormula::All);
        let nested = BooleanFormula::and(vec![
            BooleanFormula::True,
            BooleanFormula::and(vec![a.clone(), b.clone()]),
        ]);
        assert_eq!(nested, BooleanFormula::And(vec![a, b]));
    }

    #[test]
    fn test_term_flatten_order() {
        let term = StringTerm::concat(vec![
            StringVar(3).into(),
            StringTerm::concat(vec![StringVar(1).into(), StringVar(2).into()]),
        ]);
        assert_eq!(term.flatten(), vec![StringVar(3), StringVar(1), StringVar(2)]);
    }

    #[test]
    fn test_single_item_builders_collapse() {
        assert_eq!(RegexFormula::union(vec![RegexFormula::All]), RegexFormula::All);
        assert_eq!(RegexFormula::concat(vec![]), RegexFormula::epsilon());
        assert_eq!(StringTerm::concat(vec![StringVar(4).into()]), StringTerm::Var(StringVar(4)));
    }
}
