//! Analysis configuration
//!
//! ## Architecture
//! ```text
//! config/
//! ├── error.rs            # ConfigError
//! ├── validation.rs       # Validatable trait
//! ├── preset.rs           # fast / balanced / thorough limit bundles
//! ├── analysis_config.rs  # AnalysisConfig and its sections
//! └── io.rs               # YAML schema v1
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use regex_analysis::config::{AnalysisConfig, Preset};
//!
//! let config = AnalysisConfig::preset(Preset::Fast).match_type(MatchType::Full);
//! let config = AnalysisConfig::from_yaml("regex-analysis.yaml")?;
//! ```

pub mod analysis_config;
pub mod error;
pub mod io;
pub mod preset;
pub mod validation;

pub use analysis_config::{AnalysisConfig, AutomatonConfig, FinderConfig, SolverConfig};
pub use error::{ConfigError, ConfigResult};
pub use io::ConfigFileV1;
pub use preset::{Preset, PresetLimits};
pub use validation::Validatable;
