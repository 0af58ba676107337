//! SMT application: satisfiability checking

pub mod satisfiability_checker;

pub use satisfiability_checker::SatisfiabilityChecker;
