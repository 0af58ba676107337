//! Preset configurations
//!
//! Presets bundle solver and automaton limits for common use cases.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Editor feedback and CI: small automata, short timeout
    ///
    /// - Solver: 1s, 2 000 states, 64 branches
    Fast,

    /// Default analysis
    ///
    /// - Solver: 5s, 10 000 states, 256 branches
    #[default]
    Balanced,

    /// Audits of large regex-heavy code bases
    ///
    /// - Solver: 30s, 100 000 states, 4 096 branches
    Thorough,
}

/// Limit bundle produced by a preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetLimits {
    pub timeout_ms: u64,
    pub max_states: usize,
    pub max_branches: usize,
}

impl Preset {
    pub fn limits(&self) -> PresetLimits {
        match self {
            Self::Fast => PresetLimits {
                timeout_ms: 1_000,
                max_states: 2_000,
                max_branches: 64,
            },
            Self::Balanced => PresetLimits {
                timeout_ms: 5_000,
                max_states: 10_000,
                max_branches: 256,
            },
            Self::Thorough => PresetLimits {
                timeout_ms: 30_000,
                max_states: 100_000,
                max_branches: 4_096,
            },
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Balanced => "balanced",
            Self::Thorough => "thorough",
        }
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "balanced" => Ok(Self::Balanced),
            "thorough" => Ok(Self::Thorough),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_from_str() {
        assert_eq!("fast".parse::<Preset>().unwrap(), Preset::Fast);
        assert_eq!("BALANCED".parse::<Preset>().unwrap(), Preset::Balanced);
        assert_eq!("Thorough".parse::<Preset>().unwrap(), Preset::Thorough);
        assert!("custom".parse::<Preset>().is_err());
    }

    #[test]
    fn test_preset_limits_grow() {
        let fast = Preset::Fast.limits();
        let balanced = Preset::Balanced.limits();
        let thorough = Preset::Thorough.limits();

        assert!(fast.timeout_ms < balanced.timeout_ms);
        assert!(balanced.max_states < thorough.max_states);
        assert!(fast.max_branches < thorough.max_branches);
    }

    #[test]
    fn test_preset_display() {
        assert_eq!(Preset::default().to_string(), "balanced");
    }
}
