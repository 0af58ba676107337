//! SMT domain: formula algebra, constraints, match types

pub mod constraint;
pub mod error;
pub mod formula;
pub mod match_type;

pub use constraint::{Constraint, RegexConstraint, StringConstraint, StringShape};
pub use error::TranslationError;
pub use formula::{BooleanFormula, RegexFormula, StringTerm, StringVar, MAX_CODE_POINT};
pub use match_type::MatchType;
