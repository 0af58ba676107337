//! Satisfiability oracle port
//!
//! The translation engine only needs to open a prover session, add formulas
//! and ask whether their conjunction is unsatisfiable. Sessions are closed by
//! dropping them.

use crate::features::smt::domain::BooleanFormula;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    #[error("Solver timed out")]
    Timeout,

    #[error("Solver resource limit reached: {0}")]
    ResourceLimit(String),

    /// Formula outside the fragment the backend decides
    #[error("Formula not supported by the solver backend: {0}")]
    Unsupported(String),
}

pub type SolverResult<T> = Result<T, SolverError>;

/// Factory of prover sessions
pub trait SolverContext: Send + Sync {
    type Prover: ProverEnvironment;

    /// Name of this backend
    fn name(&self) -> &'static str;

    fn new_prover_environment(&self) -> Self::Prover;
}

/// One solving session
pub trait ProverEnvironment {
    fn add_constraint(&mut self, formula: BooleanFormula);

    /// `Ok(true)` when the conjunction of all added formulas has no model
    fn is_unsat(&mut self) -> SolverResult<bool>;
}
