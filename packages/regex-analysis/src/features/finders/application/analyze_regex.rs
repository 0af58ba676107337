//! Regex Analysis Use Case
//!
//! Entry point for callers: parse a pattern with the configured dialect and
//! run every enabled finder over it.
//!
//! # Architecture
//! ```text
//! CLI / library callers
//!        ↓
//! RegexAnalyzer (this module)
//!        ↓
//! parse_regex → finders (infrastructure) → SatisfiabilityChecker (smt)
//!        ↓
//! RegexIssue (domain)
//! ```

use crate::config::{AnalysisConfig, ConfigResult, Validatable};
use crate::errors::Result;
use crate::features::finders::domain::RegexIssue;
use crate::features::finders::infrastructure::{
    FailingLookaheadFinder, PossessiveContinuationFinder, UnsatisfiableRegexFinder,
};
use crate::features::parsing::{parse_regex, RegexParseResult, RegexSource};
use crate::features::smt::AutomatonSolverContext;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Issues found in one pattern of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternReport {
    pub pattern: String,
    pub issues: Vec<RegexIssue>,
    /// Set when the pattern could not be analyzed (syntax error)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Runs the configured finders over regex patterns
#[derive(Debug, Clone, Default)]
pub struct RegexAnalyzer {
    config: AnalysisConfig,
}

impl RegexAnalyzer {
    /// Create an analyzer from a validated config
    pub fn new(config: AnalysisConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Parse `pattern` with the configured dialect and analyze it
    pub fn analyze(&self, pattern: &str) -> Result<Vec<RegexIssue>> {
        let regex = parse_regex(RegexSource::new(pattern, self.config.dialect))?;
        Ok(self.analyze_parsed(&regex))
    }

    /// Analyze an already parsed regex, e.g. one parsed with host-API flags
    pub fn analyze_parsed(&self, regex: &RegexParseResult) -> Vec<RegexIssue> {
        let finders = &self.config.finders;
        let mut issues: Vec<RegexIssue> = Vec::new();

        if finders.failing_lookahead {
            FailingLookaheadFinder::new(
                &mut issues,
                self.config.match_type,
                self.config.automaton_limits(),
            )
            .find(regex);
        }
        if finders.possessive_continuation {
            PossessiveContinuationFinder::new(&mut issues, self.config.automaton_limits()).find(regex);
        }
        if finders.unsatisfiable_regex {
            let context = AutomatonSolverContext::new(self.config.solver_limits());
            UnsatisfiableRegexFinder::new(&mut issues, context).find(regex);
        }

        debug!(
            regex = regex.source().text(),
            issues = issues.len(),
            "Regex analyzed"
        );
        issues
    }

    /// Analyze independent patterns in parallel, preserving input order
    ///
    /// Every pattern gets its own solver context and checker.
    pub fn analyze_batch<S>(&self, patterns: &[S]) -> Vec<PatternReport>
    where
        S: AsRef<str> + Sync,
    {
        patterns
            .par_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                match self.analyze(pattern) {
                    Ok(issues) => PatternReport {
                        pattern: pattern.to_string(),
                        issues,
                        error: None,
                    },
                    Err(err) => {
                        warn!(pattern, error = %err, "Skipping pattern");
                        PatternReport {
                            pattern: pattern.to_string(),
                            issues: Vec::new(),
                            error: Some(err.to_string()),
                        }
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FinderConfig, Preset};
    use crate::errors::RegexAnalysisError;
    use crate::features::finders::infrastructure::{
        FAILING_LOOKAHEAD_MESSAGE, POSSESSIVE_CONTINUATION_MESSAGE, UNSATISFIABLE_REGEX_MESSAGE,
    };
    use crate::features::parsing::Dialect;
    use crate::features::smt::MatchType;

    fn messages(issues: &[RegexIssue]) -> Vec<&str> {
        issues.iter().map(|i| i.message.as_str()).collect()
    }

    #[test]
    fn test_analyze_reports_all_finders() {
        let analyzer = RegexAnalyzer::default();
        let issues = analyzer.analyze("(?=a)b").unwrap();
        let messages = messages(&issues);

        assert!(messages.contains(&FAILING_LOOKAHEAD_MESSAGE));
        assert!(messages.contains(&UNSATISFIABLE_REGEX_MESSAGE));
    }

    #[test]
    fn test_analyze_clean_pattern() {
        let analyzer = RegexAnalyzer::default();
        assert!(analyzer.analyze("[a-z]+@[a-z]+\\.com").unwrap().is_empty());
    }

    #[test]
    fn test_disabled_finders_are_skipped() {
        let config = AnalysisConfig::preset(Preset::Fast).finders(|_| FinderConfig {
            failing_lookahead: false,
            possessive_continuation: true,
            unsatisfiable_regex: false,
        });
        let analyzer = RegexAnalyzer::new(config).unwrap();

        let issues = analyzer.analyze("a*+a").unwrap();
        assert_eq!(messages(&issues), vec![POSSESSIVE_CONTINUATION_MESSAGE]);
        assert!(analyzer.analyze("(?=a)b").unwrap().is_empty());
    }

    #[test]
    fn test_dialect_controls_syntax() {
        let python = RegexAnalyzer::new(AnalysisConfig::default().dialect(Dialect::Python)).unwrap();
        assert!(matches!(
            python.analyze("a++"),
            Err(RegexAnalysisError::Syntax(_))
        ));

        let java = RegexAnalyzer::default();
        assert!(java.analyze("a++").is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnalysisConfig::default().finders(|_| FinderConfig {
            failing_lookahead: false,
            possessive_continuation: false,
            unsatisfiable_regex: false,
        });
        assert!(RegexAnalyzer::new(config).is_err());
    }

    #[test]
    fn test_analyze_batch_preserves_order() {
        let analyzer =
            RegexAnalyzer::new(AnalysisConfig::default().match_type(MatchType::Full)).unwrap();
        let patterns = ["abc", "(?=a)b", "(", "a(?=b)"];

        let reports = analyzer.analyze_batch(&patterns);

        assert_eq!(reports.len(), 4);
        assert_eq!(reports[0].pattern, "abc");
        assert!(reports[0].issues.is_empty());
        assert!(!reports[1].issues.is_empty());
        assert!(reports[2].error.is_some());
        // Nothing can follow the trailing lookahead under full matching
        assert_eq!(messages(&reports[3].issues), vec![UNSATISFIABLE_REGEX_MESSAGE]);
    }
}
