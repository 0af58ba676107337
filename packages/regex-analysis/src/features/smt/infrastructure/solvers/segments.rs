//! Reduction of a conjunct to memberships over one segmented string
//!
//! Three rewrites, applied in order:
//! 1. Witness elimination: `prefix(l, t)` where `l` is only constrained by
//!    memberships `l ∈ Eᵢ` becomes `t ∈ (∩Eᵢ)·Σ*` (suffixes likewise).
//! 2. Equation solving: `x = t` with `x` free and not occurring in `t`
//!    defines `x`; equations whose sides expand to the same variable
//!    sequence are dropped.
//! 3. Segmentation: the longest expanded term is the backbone, a sequence
//!    of distinct variables. Every membership must then constrain a
//!    contiguous window of the backbone or a single variable outside it.

use super::normal_form::{Atom, Conjunct};
use crate::features::smt::domain::{RegexFormula, StringTerm, StringVar};
use crate::features::smt::ports::{SolverError, SolverResult};
use rustc_hash::{FxHashMap, FxHashSet};

/// Conjunct in segmented form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentProblem {
    /// Variables whose concatenation is the segmented string
    pub backbone: Vec<StringVar>,
    /// `(begin, end, language)`: the concatenation of backbone variables
    /// `begin..end` (end exclusive, at least one variable) belongs to `language`
    pub windows: Vec<(usize, usize, RegexFormula)>,
    /// Memberships of variables outside the backbone
    pub isolated: Vec<(StringVar, RegexFormula)>,
    /// Languages that must contain the empty string
    pub nullable: Vec<RegexFormula>,
}

impl SegmentProblem {
    pub fn from_conjunct(conjunct: Conjunct) -> SolverResult<Self> {
        let atoms = eliminate_witnesses(conjunct);
        let (memberships, definitions) = solve_equations(atoms)?;
        segment(memberships, &definitions)
    }
}

fn unsupported(what: impl Into<String>) -> SolverError {
    SolverError::Unsupported(what.into())
}

fn eliminate_witnesses(mut atoms: Vec<Atom>) -> Vec<Atom> {
    loop {
        let Some((index, witness, target, is_prefix)) = find_eliminable(&atoms) else {
            return atoms;
        };
        atoms.remove(index);
        let mut languages = Vec::new();
        atoms.retain(|atom| match atom {
            Atom::Member(StringTerm::Var(v), language) if *v == witness => {
                languages.push(language.clone());
                false
            }
            _ => true,
        });
        if languages.is_empty() {
            continue;
        }
        let witness_language = RegexFormula::intersection(languages);
        let language = if is_prefix {
            witness_language.followed_by_anything()
        } else {
            witness_language.preceded_by_anything()
        };
        atoms.push(Atom::Member(target, language));
    }
}

/// A prefix or suffix atom whose witness occurs nowhere but in memberships
fn find_eliminable(atoms: &[Atom]) -> Option<(usize, StringVar, StringTerm, bool)> {
    atoms.iter().enumerate().find_map(|(index, atom)| {
        let (witness, target, is_prefix) = match atom {
            Atom::Prefix(StringTerm::Var(w), target) => (*w, target, true),
            Atom::Suffix(StringTerm::Var(w), target) => (*w, target, false),
            _ => return None,
        };
        if target.flatten().contains(&witness) {
            return None;
        }
        let only_memberships = atoms.iter().enumerate().all(|(other, atom)| {
            other == index
                || match atom {
                    Atom::Member(StringTerm::Var(v), _) if *v == witness => true,
                    Atom::Member(term, _) => !term.flatten().contains(&witness),
                    Atom::Prefix(a, b) | Atom::Suffix(a, b) | Atom::Equal(a, b) => {
                        !a.flatten().contains(&witness) && !b.flatten().contains(&witness)
                    }
                }
        });
        only_memberships.then(|| (index, witness, target.clone(), is_prefix))
    })
}

type Definitions = FxHashMap<StringVar, StringTerm>;

fn expand(term: &StringTerm, definitions: &Definitions) -> Vec<StringVar> {
    let mut out = Vec::new();
    for var in term.flatten() {
        match definitions.get(&var) {
            Some(definition) => out.extend(expand(definition, definitions)),
            None => out.push(var),
        }
    }
    out
}

fn solve_equations(atoms: Vec<Atom>) -> SolverResult<(Vec<(StringTerm, RegexFormula)>, Definitions)> {
    let mut memberships = Vec::new();
    let mut equations = Vec::new();
    for atom in atoms {
        match atom {
            Atom::Member(term, language) => memberships.push((term, language)),
            Atom::Equal(left, right) => equations.push((left, right)),
            Atom::Prefix(..) | Atom::Suffix(..) => {
                return Err(unsupported("prefix or suffix relation between constrained terms"))
            }
        }
    }

    let mut definitions = Definitions::default();
    let mut progress = true;
    while progress && !equations.is_empty() {
        progress = false;
        let mut remaining = Vec::new();
        for (left, right) in equations {
            let left_vars = expand(&left, &definitions);
            let right_vars = expand(&right, &definitions);
            if left_vars == right_vars {
                progress = true;
                continue;
            }
            let definable = |vars: &[StringVar], other: &[StringVar]| match vars {
                [single] if !other.contains(single) => Some(*single),
                _ => None,
            };
            if let Some(var) = definable(&left_vars, &right_vars) {
                definitions.insert(var, right);
                progress = true;
            } else if let Some(var) = definable(&right_vars, &left_vars) {
                definitions.insert(var, left);
                progress = true;
            } else {
                remaining.push((left, right));
            }
        }
        equations = remaining;
    }
    if !equations.is_empty() {
        return Err(unsupported(format!(
            "{} word equations without a free side",
            equations.len()
        )));
    }
    Ok((memberships, definitions))
}

fn segment(
    memberships: Vec<(StringTerm, RegexFormula)>,
    definitions: &Definitions,
) -> SolverResult<SegmentProblem> {
    let expanded: Vec<(Vec<StringVar>, RegexFormula)> = memberships
        .into_iter()
        .map(|(term, language)| (expand(&term, definitions), language))
        .collect();

    let backbone = definitions
        .keys()
        .map(|var| expand(&StringTerm::Var(*var), definitions))
        .chain(expanded.iter().map(|(vars, _)| vars.clone()))
        .max_by_key(Vec::len)
        .unwrap_or_default();
    let mut seen = FxHashSet::default();
    if !backbone.iter().all(|var| seen.insert(*var)) {
        return Err(unsupported("variable occurs twice in the segmented string"));
    }
    let position: FxHashMap<StringVar, usize> =
        backbone.iter().enumerate().map(|(i, var)| (*var, i)).collect();

    let mut problem = SegmentProblem {
        backbone,
        ..SegmentProblem::default()
    };
    for (vars, language) in expanded {
        let Some(first) = vars.first() else {
            problem.nullable.push(language);
            continue;
        };
        match position.get(first) {
            Some(begin) => {
                let end = begin + vars.len();
                if problem.backbone.get(*begin..end) != Some(vars.as_slice()) {
                    return Err(unsupported("membership term is not a window of the segmented string"));
                }
                problem.windows.push((*begin, end, language));
            }
            None if vars.len() == 1 => problem.isolated.push((*first, language)),
            None => return Err(unsupported("membership term outside the segmented string")),
        }
    }
    Ok(problem)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(n: u32) -> StringTerm {
        StringVar(n).into()
    }

    fn concat(ns: &[u32]) -> StringTerm {
        StringTerm::concat(ns.iter().map(|n| var(*n)).collect())
    }

    #[test]
    fn test_lookahead_conjunct_segments() {
        // (?=a)b: s4 = s0·s3, s0 ∈ ε, s1 ∈ a, prefix(s1, s2), s3 ∈ b, s2 = s3
        let conjunct = vec![
            Atom::Equal(var(4), concat(&[0, 3])),
            Atom::Member(var(0), RegexFormula::epsilon()),
            Atom::Member(var(1), RegexFormula::literal("a")),
            Atom::Prefix(var(1), var(2)),
            Atom::Member(var(3), RegexFormula::literal("b")),
            Atom::Equal(var(2), var(3)),
        ];
        let problem = SegmentProblem::from_conjunct(conjunct).expect("segmentable");
        assert_eq!(problem.backbone, vec![StringVar(0), StringVar(3)]);
        assert_eq!(problem.windows.len(), 3);
        assert!(problem
            .windows
            .contains(&(1, 2, RegexFormula::literal("a").followed_by_anything())));
        assert!(problem.isolated.is_empty());
    }

    #[test]
    fn test_unconstrained_witness_is_dropped() {
        let conjunct = vec![Atom::Prefix(var(1), var(2)), Atom::Member(var(2), RegexFormula::All)];
        let problem = SegmentProblem::from_conjunct(conjunct).expect("segmentable");
        assert_eq!(problem.windows, vec![(0, 1, RegexFormula::All)]);
    }

    #[test]
    fn test_cyclic_equation_is_unsupported() {
        let conjunct = vec![Atom::Equal(var(0), concat(&[0, 1]))];
        assert!(matches!(
            SegmentProblem::from_conjunct(conjunct),
            Err(SolverError::Unsupported(_))
        ));
    }

    #[test]
    fn test_repeated_variable_is_unsupported() {
        let conjunct = vec![
            Atom::Equal(var(5), concat(&[0, 1, 0])),
            Atom::Member(var(0), RegexFormula::All),
        ];
        assert!(SegmentProblem::from_conjunct(conjunct).is_err());
    }

    #[test]
    fn test_empty_term_becomes_nullable_check() {
        let conjunct = vec![Atom::Member(StringTerm::Concat(Vec::new()), RegexFormula::All)];
        let problem = SegmentProblem::from_conjunct(conjunct).expect("segmentable");
        assert_eq!(problem.nullable, vec![RegexFormula::All]);
    }
}
