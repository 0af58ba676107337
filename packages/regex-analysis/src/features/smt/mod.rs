//! Regex satisfiability through string constraints
//!
//! ## Architecture
//! ```text
//! smt/
//! ├── domain/          # Formula algebra, constraints, match types
//! ├── ports/           # SolverContext / ProverEnvironment
//! ├── infrastructure/  # Tree translation, continuations, automaton backend
//! └── application/     # SatisfiabilityChecker
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use regex_analysis::features::smt::{AutomatonSolverContext, MatchType, SatisfiabilityChecker};
//!
//! let mut checker = SatisfiabilityChecker::new(AutomatonSolverContext::default());
//! let satisfiable = checker.check(&parsed, MatchType::Full, true);
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::SatisfiabilityChecker;
pub use domain::*;
pub use infrastructure::{AutomatonSolverContext, SolverLimits};
pub use ports::{ProverEnvironment, SolverContext, SolverError, SolverResult};
