//! Solver backends

pub mod automaton_solver;
pub mod normal_form;
pub mod segments;

pub use automaton_solver::{AutomatonProver, AutomatonSolverContext, SolverLimits};
