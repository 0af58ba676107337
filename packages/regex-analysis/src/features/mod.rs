//! Feature slices
//!
//! - `parsing`: character layer, parser, syntax tree and automaton view
//! - `automata`: code-point NFAs/DFAs
//! - `smt`: constraint translation and satisfiability checking
//! - `finders`: issue finders and the analysis use case

pub mod automata;
pub mod finders;
pub mod parsing;
pub mod smt;
