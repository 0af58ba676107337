//! SMT ports

pub mod solver;

pub use solver::{ProverEnvironment, SolverContext, SolverError, SolverResult};
