//! SMT infrastructure: tree translation, continuation binding, solver backends

pub mod concatenation;
pub mod continuation;
pub mod disjunction;
pub mod formula_manager;
pub mod regex_language;
pub mod solvers;
pub mod translator;

pub use continuation::continuation_constraints;
pub use formula_manager::FormulaManager;
pub use solvers::{AutomatonProver, AutomatonSolverContext, SolverLimits};
pub use translator::{repetition_language, ConstraintTranslator, TranslationResult};
