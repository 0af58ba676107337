/*
 * Regex Analysis - Static checks for regular expressions
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (IndexRange)
 * - config/      : Presets, limits, YAML loading
 * - features/    : Vertical slices (parsing → automata → smt → finders)
 *
 * Analyses:
 * - Exact satisfiability of patterns with lookarounds and possessive quantifiers
 * - Lookaheads that can never succeed
 * - Possessive quantifiers that starve their continuation
 */

#![allow(clippy::too_many_arguments)] // Intersection flags mirror the finder call sites
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::upper_case_acronyms)] // NFA, DFA, DNF naming

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Configuration (presets, limits, YAML)
pub mod config;

/// Crate-wide error types
pub mod errors;

/// Feature slices
pub mod features;

/// Shared models
pub mod shared;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{AnalysisConfig, ConfigError, Preset};
pub use errors::{RegexAnalysisError, Result, SyntaxError};
pub use features::finders::{PatternReport, RegexAnalyzer, RegexIssue, RegexIssueLocation};
pub use features::parsing::{parse_regex, parse_regex_with_flags, Dialect, RegexParseResult, RegexSource};
pub use features::smt::{AutomatonSolverContext, MatchType, SatisfiabilityChecker, SolverLimits};
pub use shared::models::IndexRange;
