//! Configuration I/O (YAML loading)
//!
//! Files carry a mandatory `version: 1`, an optional base preset and
//! optional per-field overrides applied on top of it.

use super::analysis_config::{AnalysisConfig, FinderConfig};
use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use super::validation::Validatable;
use crate::features::parsing::Dialect;
use crate::features::smt::MatchType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

const SUPPORTED_VERSIONS: &[u32] = &[1];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    pub version: Option<u32>,

    /// Base preset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<Preset>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<Dialect>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_type: Option<MatchType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solver: Option<SolverOverrides>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automaton: Option<AutomatonOverrides>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finders: Option<FinderConfig>,
}

/// Solver fields a file may override individually
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_states: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_branches: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AutomatonOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_states: Option<usize>,
}

impl ConfigFileV1 {
    /// Resolve into a validated config
    pub fn into_config(self) -> ConfigResult<AnalysisConfig> {
        match self.version {
            None => return Err(ConfigError::MissingVersion),
            Some(v) if !SUPPORTED_VERSIONS.contains(&v) => {
                return Err(ConfigError::UnsupportedVersion {
                    found: v,
                    supported: SUPPORTED_VERSIONS.to_vec(),
                })
            }
            Some(_) => {}
        }

        let mut config = AnalysisConfig::preset(self.preset.unwrap_or_default());
        if let Some(dialect) = self.dialect {
            config.dialect = dialect;
        }
        if let Some(match_type) = self.match_type {
            config.match_type = match_type;
        }
        if let Some(solver) = self.solver {
            if let Some(timeout_ms) = solver.timeout_ms {
                config.solver.timeout_ms = timeout_ms;
            }
            if let Some(max_states) = solver.max_states {
                config.solver.max_states = max_states;
            }
            if let Some(max_branches) = solver.max_branches {
                config.solver.max_branches = max_branches;
            }
        }
        if let Some(max_states) = self.automaton.and_then(|a| a.max_states) {
            config.automaton.max_states = max_states;
        }
        if let Some(finders) = self.finders {
            config.finders = finders;
        }

        config.validate()?;
        Ok(config)
    }

    fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            version: Some(1),
            preset: Some(config.preset),
            dialect: Some(config.dialect),
            match_type: Some(config.match_type),
            solver: Some(SolverOverrides {
                timeout_ms: Some(config.solver.timeout_ms),
                max_states: Some(config.solver.max_states),
                max_branches: Some(config.solver.max_branches),
            }),
            automaton: Some(AutomatonOverrides {
                max_states: Some(config.automaton.max_states),
            }),
            finders: Some(config.finders.clone()),
        }
    }
}

impl AnalysisConfig {
    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(yaml)?;
        file.into_config()
    }

    /// Load a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading analysis config");
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Export as a complete v1 document
    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(&ConfigFileV1::from_config(self))?)
    }
}
