//! Automaton intersection of two pattern fragments
//!
//! Fragments are re-parsed on their own, translated to regular languages and
//! determinized. Anything that cannot be converted (lookarounds, back-references,
//! state limits) yields the caller's default answer, which finders choose so
//! that no issue is reported.

use crate::features::automata::{compile, AutomatonError, AutomatonLimits, Dfa};
use crate::features::parsing::domain::{
    FlagSet, NodeKind, RegexFeature, RegexParseResult, RegexSource,
};
use crate::features::parsing::parse_regex_with_flags;
use crate::features::smt::domain::{Constraint, MAX_CODE_POINT};
use crate::features::smt::infrastructure::{ConstraintTranslator, FormulaManager};
use std::collections::BTreeSet;
use tracing::trace;

/// Parsing context shared by both fragments
#[derive(Debug, Clone)]
pub struct PatternIntersection {
    features: BTreeSet<RegexFeature>,
    flags: FlagSet,
    limits: AutomatonLimits,
}

impl PatternIntersection {
    pub fn new(features: BTreeSet<RegexFeature>, flags: FlagSet, limits: AutomatonLimits) -> Self {
        Self {
            features,
            flags,
            limits,
        }
    }

    /// Context for fragments of `regex`
    ///
    /// `None` when the flags in effect differ between the elements of the
    /// pattern, since a fragment parsed on its own would lose them.
    pub fn for_regex(regex: &RegexParseResult, limits: AutomatonLimits) -> Option<Self> {
        let tree = regex.tree();
        let mut flags = tree
            .ids()
            .filter(|id| is_flag_sensitive(tree.kind(*id)))
            .map(|id| tree.flags(id));
        let first = flags.next().unwrap_or_default();
        if flags.any(|other| other != first) {
            return None;
        }
        Some(Self::new(regex.source().features().clone(), first, limits))
    }

    /// Do the languages of `a` and `b` overlap
    ///
    /// - `prefix_a` / `prefix_b`: replace the language by its prefix closure.
    ///   With both set, tests whether one side overlaps a prefix of the other.
    /// - `negate`: replace `a` by the strings that do not start with a word
    ///   of `a`.
    pub fn intersects(
        &self,
        a: &str,
        b: &str,
        default_answer: bool,
        prefix_a: bool,
        prefix_b: bool,
        negate: bool,
    ) -> bool {
        match self.try_intersects(a, b, prefix_a, prefix_b, negate) {
            Ok(answer) => answer,
            Err(err) => {
                trace!(a, b, error = %err, "intersection undecided");
                default_answer
            }
        }
    }

    fn try_intersects(
        &self,
        a: &str,
        b: &str,
        prefix_a: bool,
        prefix_b: bool,
        negate: bool,
    ) -> Result<bool, AutomatonError> {
        let mut dfa_a = self.language(a, negate)?;
        let mut dfa_b = self.language(b, false)?;
        if negate {
            dfa_a = dfa_a.followed_by_anything(MAX_CODE_POINT).complement(MAX_CODE_POINT);
        }
        if prefix_a && prefix_b {
            let mut a_prefixes = dfa_a.clone();
            a_prefixes.prefix_close();
            let mut b_prefixes = dfa_b.clone();
            b_prefixes.prefix_close();
            return Ok(!(dfa_a.intersect(&b_prefixes, &self.limits)?.is_empty()
                && a_prefixes.intersect(&dfa_b, &self.limits)?.is_empty()));
        }
        if prefix_a {
            dfa_a.prefix_close();
        }
        if prefix_b {
            dfa_b.prefix_close();
        }
        Ok(!dfa_a.intersect(&dfa_b, &self.limits)?.is_empty())
    }

    /// Does `text` match the empty string
    pub fn matches_empty(&self, text: &str) -> Result<bool, AutomatonError> {
        let dfa = self.language(text, false)?;
        Ok(dfa.states[dfa.start].accepting)
    }

    fn language(&self, text: &str, negated: bool) -> Result<Dfa, AutomatonError> {
        let source = RegexSource::with_features(text, self.features.clone());
        let regex = parse_regex_with_flags(source, self.flags)
            .map_err(|err| AutomatonError::Unsupported(err.to_string()))?;
        let mut manager = FormulaManager::new();
        let translated = if negated {
            ConstraintTranslator::negated(&regex, &mut manager).translate(regex.root())
        } else {
            ConstraintTranslator::new(&regex, &mut manager).translate(regex.root())
        };
        match translated.map_err(|err| AutomatonError::Unsupported(err.to_string()))? {
            Constraint::Regex(language) => compile(&language.formula, &self.limits),
            Constraint::String(_) => Err(AutomatonError::Unsupported(
                "lookaround or possessive repetition".to_string(),
            )),
        }
    }
}

/// Elements whose language depends on the flags in effect
fn is_flag_sensitive(kind: &NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Character { .. }
            | NodeKind::CharacterClass { .. }
            | NodeKind::CharacterRange { .. }
            | NodeKind::Dot
            | NodeKind::EscapedCharacterClass { .. }
            | NodeKind::Boundary(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::domain::Dialect;

    fn intersection() -> PatternIntersection {
        PatternIntersection::new(Dialect::Java.features(), FlagSet::empty(), AutomatonLimits::default())
    }

    #[test]
    fn test_plain_intersection() {
        let i = intersection();
        assert!(i.intersects("[a-c]", "[c-e]", false, false, false, false));
        assert!(!i.intersects("a", "b", true, false, false, false));
    }

    #[test]
    fn test_prefix_closure() {
        let i = intersection();
        assert!(i.intersects("ab", "abc", false, false, true, false));
        assert!(!i.intersects("ab", "abc", true, true, false, false));
        assert!(i.intersects("abc", "ab", false, true, false, false));
        assert!(i.intersects("a", "ab", false, true, true, false));
        assert!(!i.intersects("a", "b", true, true, true, false));
    }

    #[test]
    fn test_negated_side() {
        let i = intersection();
        assert!(!i.intersects("x", "x", true, false, false, true));
        assert!(i.intersects("x", "y", false, false, false, true));
        assert!(!i.intersects("[a-z]", "z", true, false, false, true));
        assert!(i.intersects("[a-y]", "z", false, false, false, true));
    }

    #[test]
    fn test_unsupported_returns_default() {
        let i = intersection();
        assert!(i.intersects("(a)\\1", "a", true, false, false, false));
        assert!(!i.intersects("(?=a)", "a", false, false, false, false));
        assert!(i.intersects("(", "a", true, false, false, false));
    }

    #[test]
    fn test_inline_flag_change_disables_fragments() {
        let limits = AutomatonLimits::default();
        let parse = |pattern: &str| crate::features::parsing::parse_regex(RegexSource::java(pattern)).expect("valid regex");
        assert!(PatternIntersection::for_regex(&parse("a(?i)b"), limits).is_none());
        assert!(PatternIntersection::for_regex(&parse("(?i)ab"), limits).is_some());
        assert!(PatternIntersection::for_regex(&parse("a(?=b)c"), limits).is_some());
    }

    #[test]
    fn test_matches_empty() {
        let i = intersection();
        assert_eq!(i.matches_empty("a?"), Ok(true));
        assert_eq!(i.matches_empty("a"), Ok(false));
    }
}
