//! Analysis configuration
//!
//! One struct per concern, all `#[serde(default)]` so partial YAML files and
//! builder-style overrides compose with presets.

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use super::validation::{check_range, Validatable};
use crate::features::automata::AutomatonLimits;
use crate::features::parsing::Dialect;
use crate::features::smt::{MatchType, SolverLimits};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ═══════════════════════════════════════════════════════════════════════════
// Solver
// ═══════════════════════════════════════════════════════════════════════════

/// Limits for the exact satisfiability check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Wall-clock budget per query in milliseconds (1..=600000)
    pub timeout_ms: u64,
    /// Largest product automaton the backend may build (16..=10000000)
    pub max_states: usize,
    /// Largest disjunctive normal form the backend expands (1..=65536)
    pub max_branches: usize,
}

impl SolverConfig {
    pub fn from_preset(preset: Preset) -> Self {
        let limits = preset.limits();
        Self {
            timeout_ms: limits.timeout_ms,
            max_states: limits.max_states,
            max_branches: limits.max_branches,
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

impl Validatable for SolverConfig {
    fn validate(&self) -> ConfigResult<()> {
        check_range(
            "solver.timeout_ms",
            self.timeout_ms,
            1,
            600_000,
            "Timeout must be positive and at most ten minutes",
        )?;
        check_range(
            "solver.max_states",
            self.max_states,
            16,
            10_000_000,
            "Very small state budgets make every query give up",
        )?;
        check_range(
            "solver.max_branches",
            self.max_branches,
            1,
            65_536,
            "At least one DNF branch is needed to decide anything",
        )
    }

    fn config_name(&self) -> &'static str {
        "SolverConfig"
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Automata (heuristic finders)
// ═══════════════════════════════════════════════════════════════════════════

/// Limits for the intersection checks of the heuristic finders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AutomatonConfig {
    /// State ceiling per automaton (16..=10000000)
    pub max_states: usize,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            max_states: Preset::default().limits().max_states,
        }
    }
}

impl Validatable for AutomatonConfig {
    fn validate(&self) -> ConfigResult<()> {
        check_range(
            "automaton.max_states",
            self.max_states,
            16,
            10_000_000,
            "Very small state budgets make every intersection give up",
        )
    }

    fn config_name(&self) -> &'static str {
        "AutomatonConfig"
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Finders
// ═══════════════════════════════════════════════════════════════════════════

/// Finder on/off switches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FinderConfig {
    pub failing_lookahead: bool,
    pub possessive_continuation: bool,
    pub unsatisfiable_regex: bool,
}

impl FinderConfig {
    pub fn any_enabled(&self) -> bool {
        self.failing_lookahead || self.possessive_continuation || self.unsatisfiable_regex
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            failing_lookahead: true,
            possessive_continuation: true,
            unsatisfiable_regex: true,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// AnalysisConfig
// ═══════════════════════════════════════════════════════════════════════════

/// Complete configuration of a [`RegexAnalyzer`](crate::features::finders::RegexAnalyzer)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub preset: Preset,
    pub dialect: Dialect,
    pub match_type: MatchType,
    pub solver: SolverConfig,
    pub automaton: AutomatonConfig,
    pub finders: FinderConfig,
}

impl AnalysisConfig {
    /// Start from a preset
    pub fn preset(preset: Preset) -> Self {
        Self {
            preset,
            solver: SolverConfig::from_preset(preset),
            automaton: AutomatonConfig {
                max_states: preset.limits().max_states,
            },
            ..Self::default()
        }
    }

    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn match_type(mut self, match_type: MatchType) -> Self {
        self.match_type = match_type;
        self
    }

    /// Override solver limits
    pub fn solver<F>(mut self, f: F) -> Self
    where
        F: FnOnce(SolverConfig) -> SolverConfig,
    {
        self.solver = f(self.solver);
        self
    }

    /// Override finder switches
    pub fn finders<F>(mut self, f: F) -> Self
    where
        F: FnOnce(FinderConfig) -> FinderConfig,
    {
        self.finders = f(self.finders);
        self
    }

    pub fn solver_limits(&self) -> SolverLimits {
        SolverLimits {
            timeout_ms: self.solver.timeout_ms,
            max_states: self.solver.max_states,
            max_branches: self.solver.max_branches,
        }
    }

    /// Fresh automaton limits; the deadline starts counting now
    pub fn automaton_limits(&self) -> AutomatonLimits {
        AutomatonLimits::new(self.automaton.max_states)
            .with_timeout(Duration::from_millis(self.solver.timeout_ms))
    }
}

impl Validatable for AnalysisConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.solver.validate()?;
        self.automaton.validate()?;
        if !self.finders.any_enabled() {
            return Err(ConfigError::Custom(
                "All finders are disabled; enable at least one of failing_lookahead, \
                 possessive_continuation, unsatisfiable_regex"
                    .to_string(),
            ));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "AnalysisConfig"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_balanced() {
        let config = AnalysisConfig::default();
        assert_eq!(config, AnalysisConfig::preset(Preset::Balanced));
        assert_eq!(config.solver_limits(), SolverLimits::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_preset_limits_flow_into_config() {
        let config = AnalysisConfig::preset(Preset::Fast);
        assert_eq!(config.solver.timeout_ms, 1_000);
        assert_eq!(config.automaton.max_states, 2_000);
        assert_eq!(config.solver_limits().max_branches, 64);
        assert_eq!(config.automaton_limits().max_states, 2_000);
    }

    #[test]
    fn test_builder_overrides() {
        let config = AnalysisConfig::preset(Preset::Thorough)
            .dialect(Dialect::Python)
            .match_type(MatchType::Full)
            .solver(|s| SolverConfig { timeout_ms: 250, ..s })
            .finders(|f| FinderConfig {
                unsatisfiable_regex: false,
                ..f
            });

        assert_eq!(config.dialect, Dialect::Python);
        assert_eq!(config.match_type, MatchType::Full);
        assert_eq!(config.solver.timeout_ms, 250);
        assert_eq!(config.solver.max_states, 100_000);
        assert!(!config.finders.unsatisfiable_regex);
        assert!(config.finders.failing_lookahead);
    }

    #[test]
    fn test_validation_rejects_zero_branches() {
        let config = AnalysisConfig::default().solver(|s| SolverConfig {
            max_branches: 0,
            ..s
        });

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("solver.max_branches"));
    }

    #[test]
    fn test_validation_rejects_all_finders_disabled() {
        let config = AnalysisConfig::default().finders(|_| FinderConfig {
            failing_lookahead: false,
            possessive_continuation: false,
            unsatisfiable_regex: false,
        });

        assert!(matches!(config.validate(), Err(ConfigError::Custom(_))));
    }
}
