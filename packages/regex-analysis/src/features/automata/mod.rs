//! Finite automata over code points
//!
//! Used directly by the heuristic finders (`intersects`) and by the built-in
//! solver backend, which runs the same constructions over an alphabet
//! extended with boundary markers.

pub mod domain;
pub mod infrastructure;

pub use domain::{AutomatonError, AutomatonLimits, CharSet};
pub use infrastructure::{compile, Dfa, Nfa};
