//! Regex formula to automaton compilation
//!
//! Thompson construction for the regular operators; complement, intersection
//! and difference go through a determinized sub-automaton that is embedded
//! back into the NFA.

use super::dfa::Dfa;
use super::nfa::Nfa;
use crate::features::automata::domain::{AutomatonError, AutomatonLimits};
use crate::features::smt::domain::formula::{RegexFormula, MAX_CODE_POINT};

/// Deterministic automaton of `formula` over code points
pub fn compile(formula: &RegexFormula, limits: &AutomatonLimits) -> Result<Dfa, AutomatonError> {
    let mut nfa = Nfa::new(limits);
    let (start, accept) = build(&mut nfa, formula, limits)?;
    nfa.start = start;
    nfa.accept = accept;
    Dfa::from_nfa(&nfa, limits)
}

fn build(
    nfa: &mut Nfa,
    formula: &RegexFormula,
    limits: &AutomatonLimits,
) -> Result<(usize, usize), AutomatonError> {
    let start = nfa.add_state()?;
    match formula {
        RegexFormula::None => {
            let accept = nfa.add_state()?;
            Ok((start, accept))
        }
        RegexFormula::All => {
            let accept = nfa.add_state()?;
            nfa.add_transition(start, 0, MAX_CODE_POINT, start);
            nfa.add_epsilon(start, accept);
            Ok((start, accept))
        }
        RegexFormula::AllChar => {
            let accept = nfa.add_state()?;
            nfa.add_transition(start, 0, MAX_CODE_POINT, accept);
            Ok((start, accept))
        }
        RegexFormula::Literal(text) => {
            let mut current = start;
            for c in text.chars() {
                let next = nfa.add_state()?;
                nfa.add_transition(current, c as u32, c as u32, next);
                current = next;
            }
            Ok((start, current))
        }
        RegexFormula::Range(lower, upper) => {
            let accept = nfa.add_state()?;
            nfa.add_transition(start, *lower, (*upper).min(MAX_CODE_POINT), accept);
            Ok((start, accept))
        }
        RegexFormula::Union(items) => {
            let accept = nfa.add_state()?;
            for item in items {
                let (s, e) = build(nfa, item, limits)?;
                nfa.add_epsilon(start, s);
                nfa.add_epsilon(e, accept);
            }
            Ok((start, accept))
        }
        RegexFormula::Concat(items) => {
            let mut current = start;
            for item in items {
                let (s, e) = build(nfa, item, limits)?;
                nfa.add_epsilon(current, s);
                current = e;
            }
            Ok((start, current))
        }
        RegexFormula::Closure(inner) => {
            let accept = nfa.add_state()?;
            let (s, e) = build(nfa, inner, limits)?;
            nfa.add_epsilon(start, s);
            nfa.add_epsilon(e, s);
            nfa.add_epsilon(start, accept);
            nfa.add_epsilon(e, accept);
            Ok((start, accept))
        }
        RegexFormula::Cross(inner) => {
            let accept = nfa.add_state()?;
            let (s, e) = build(nfa, inner, limits)?;
            nfa.add_epsilon(start, s);
            nfa.add_epsilon(e, s);
            nfa.add_epsilon(e, accept);
            Ok((start, accept))
        }
        RegexFormula::Optional(inner) => {
            let accept = nfa.add_state()?;
            let (s, e) = build(nfa, inner, limits)?;
            nfa.add_epsilon(start, s);
            nfa.add_epsilon(start, accept);
            nfa.add_epsilon(e, accept);
            Ok((start, accept))
        }
        RegexFormula::Times(inner, count) => {
            let mut current = start;
            for _ in 0..*count {
                let (s, e) = build(nfa, inner, limits)?;
                nfa.add_epsilon(current, s);
                current = e;
            }
            Ok((start, current))
        }
        RegexFormula::Complement(inner) => {
            let dfa = compile(inner, limits)?.complement(MAX_CODE_POINT);
            embed(nfa, start, &dfa)
        }
        RegexFormula::Intersection(items) => {
            let mut iter = items.iter();
            let mut dfa = match iter.next() {
                Some(first) => compile(first, limits)?,
                None => Dfa::universal(MAX_CODE_POINT),
            };
            for item in iter {
                dfa = dfa.intersect(&compile(item, limits)?, limits)?;
            }
            embed(nfa, start, &dfa)
        }
        RegexFormula::Difference(left, right) => {
            let dfa = compile(left, limits)?
                .intersect(&compile(right, limits)?.complement(MAX_CODE_POINT), limits)?;
            embed(nfa, start, &dfa)
        }
    }
}

/// Copy `dfa` into `nfa`, entered from `entry`
fn embed(nfa: &mut Nfa, entry: usize, dfa: &Dfa) -> Result<(usize, usize), AutomatonError> {
    let accept = nfa.add_state()?;
    let mut ids = Vec::with_capacity(dfa.len());
    for _ in 0..dfa.len() {
        ids.push(nfa.add_state()?);
    }
    for (id, state) in dfa.states.iter().enumerate() {
        for (lo, hi, to) in &state.transitions {
            nfa.add_transition(ids[id], *lo, *hi, ids[*to]);
        }
        if state.accepting {
            nfa.add_epsilon(ids[id], accept);
        }
    }
    nfa.add_epsilon(entry, ids[dfa.start]);
    Ok((entry, accept))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> Vec<u32> {
        text.chars().map(|c| c as u32).collect()
    }

    fn dfa(formula: &RegexFormula) -> Dfa {
        compile(formula, &AutomatonLimits::default()).unwrap()
    }

    #[test]
    fn test_literal_and_closure() {
        let ab_star = RegexFormula::literal("ab").closure();
        let automaton = dfa(&ab_star);
        assert!(automaton.accepts(&word("")));
        assert!(automaton.accepts(&word("abab")));
        assert!(!automaton.accepts(&word("aba")));
    }

    #[test]
    fn test_complement_and_difference() {
        let not_a = RegexFormula::AllChar.difference(RegexFormula::char('a'));
        let automaton = dfa(&not_a);
        assert!(automaton.accepts(&word("b")));
        assert!(!automaton.accepts(&word("a")));
        assert!(!automaton.accepts(&word("bb")));

        let no_a_prefix = RegexFormula::char('a').followed_by_anything().complement();
        let automaton = dfa(&no_a_prefix);
        assert!(automaton.accepts(&word("")));
        assert!(automaton.accepts(&word("ba")));
        assert!(!automaton.accepts(&word("ab")));
    }

    #[test]
    fn test_intersection_emptiness() {
        let both = RegexFormula::intersection(vec![
            RegexFormula::range('a' as u32, 'b' as u32),
            RegexFormula::range('b' as u32, 'c' as u32),
        ]);
        let automaton = dfa(&both);
        assert!(automaton.accepts(&word("b")));
        assert!(!automaton.accepts(&word("a")));

        let none = RegexFormula::intersection(vec![RegexFormula::char('a'), RegexFormula::char('b')]);
        assert!(dfa(&none).is_empty());
    }

    #[test]
    fn test_prefix_close_and_empty_string() {
        let mut automaton = dfa(&RegexFormula::literal("abc"));
        assert!(!automaton.is_empty_string());
        automaton.prefix_close();
        assert!(automaton.accepts(&word("ab")));
        assert!(automaton.accepts(&word("")));

        let epsilon = dfa(&RegexFormula::epsilon());
        assert!(epsilon.is_empty_string());
        assert!(!dfa(&RegexFormula::None).is_empty_string());
    }

    #[test]
    fn test_bounded_repetition() {
        let formula = RegexFormula::concat(vec![
            RegexFormula::char('x').times(2),
            RegexFormula::char('x').optional().times(1),
        ]);
        let automaton = dfa(&formula);
        assert!(automaton.accepts(&word("xx")));
        assert!(automaton.accepts(&word("xxx")));
        assert!(!automaton.accepts(&word("xxxx")));
        assert!(!automaton.accepts(&word("x")));
    }

    #[test]
    fn test_state_limit() {
        let huge = RegexFormula::AllChar.optional().times(10_000);
        let limits = AutomatonLimits::new(50);
        assert!(matches!(
            compile(&huge, &limits),
            Err(AutomatonError::StateLimitExceeded { .. })
        ));
    }
}
