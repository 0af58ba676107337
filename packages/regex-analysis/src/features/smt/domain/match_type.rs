//! How a regex is applied to its input

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// The whole input must match, as with `String.matches`
    Full,
    /// Any substring may match, as with `Matcher.find`
    Partial,
    /// Usage unknown; treated like [`MatchType::Partial`]
    #[default]
    Unknown,
}

impl MatchType {
    pub fn is_full(self) -> bool {
        self == MatchType::Full
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "full" => Some(MatchType::Full),
            "partial" => Some(MatchType::Partial),
            "unknown" => Some(MatchType::Unknown),
            _ => None,
        }
    }
}
