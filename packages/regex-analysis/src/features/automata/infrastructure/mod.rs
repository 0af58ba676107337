//! Automata infrastructure: NFA, DFA, formula compiler

pub mod compiler;
pub mod dfa;
pub mod nfa;

pub use compiler::compile;
pub use dfa::{Dfa, DfaState};
pub use nfa::Nfa;
