//! Regex source text and dialect features

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Optional syntax supported by some regex dialects only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RegexFeature {
    AtomicGroup,
    PossessiveQuantifier,
    /// `(?<name>..)`
    JavaSyntaxGroupName,
    /// `(?P<name>..)` and `(?P=name)`
    PythonSyntaxGroupName,
    /// `[a[bc]]` and `[a-z&&[^x]]`
    NestedCharacterClass,
    /// `(?(1)yes|no)`
    ConditionalSubpattern,
    /// `\uXXXX` (with any number of `u`) decoded before regex parsing
    JavaUnicodeEscapes,
}

/// Named regex dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Java,
    Python,
    Pcre,
}

impl Dialect {
    pub fn features(self) -> BTreeSet<RegexFeature> {
        use RegexFeature::*;
        let features: &[RegexFeature] = match self {
            Dialect::Java => &[
                AtomicGroup,
                PossessiveQuantifier,
                JavaSyntaxGroupName,
                NestedCharacterClass,
                JavaUnicodeEscapes,
            ],
            Dialect::Python => &[PythonSyntaxGroupName, ConditionalSubpattern],
            Dialect::Pcre => &[
                AtomicGroup,
                PossessiveQuantifier,
                JavaSyntaxGroupName,
                PythonSyntaxGroupName,
                ConditionalSubpattern,
            ],
        };
        features.iter().copied().collect()
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "java" => Some(Dialect::Java),
            "python" => Some(Dialect::Python),
            "pcre" => Some(Dialect::Pcre),
            _ => None,
        }
    }
}

/// Regex text together with the dialect features it is parsed with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexSource {
    text: String,
    features: BTreeSet<RegexFeature>,
}

impl RegexSource {
    pub fn new(text: impl Into<String>, dialect: Dialect) -> Self {
        Self::with_features(text, dialect.features())
    }

    pub fn with_features(text: impl Into<String>, features: BTreeSet<RegexFeature>) -> Self {
        Self {
            text: text.into(),
            features,
        }
    }

    pub fn java(text: impl Into<String>) -> Self {
        Self::new(text, Dialect::Java)
    }

    pub fn python(text: impl Into<String>) -> Self {
        Self::new(text, Dialect::Python)
    }

    pub fn pcre(text: impl Into<String>) -> Self {
        Self::new(text, Dialect::Pcre)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn supports(&self, feature: RegexFeature) -> bool {
        self.features.contains(&feature)
    }

    pub fn features(&self) -> &BTreeSet<RegexFeature> {
        &self.features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_features() {
        let java = RegexSource::java("a++");
        assert!(java.supports(RegexFeature::PossessiveQuantifier));
        assert!(!java.supports(RegexFeature::ConditionalSubpattern));

        let python = RegexSource::python("(?P<x>a)");
        assert!(python.supports(RegexFeature::PythonSyntaxGroupName));
        assert!(!python.supports(RegexFeature::AtomicGroup));
    }

    #[test]
    fn test_dialect_parse() {
        assert_eq!(Dialect::parse("PCRE"), Some(Dialect::Pcre));
        assert_eq!(Dialect::parse("perl"), None);
    }
}
