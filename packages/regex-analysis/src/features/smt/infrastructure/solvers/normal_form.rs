//! Disjunctive normal form over string atoms
//!
//! Negations are pushed down to the atoms. A negated membership becomes a
//! membership in the complement; negated prefix, suffix and equality atoms
//! have no regular counterpart and are rejected. Universal quantifiers are
//! only accepted in the shape produced for negative lookarounds and
//! possessive repetitions:
//!
//! ```text
//! ∀l. l ∈ E → ¬prefix(l, t)    ⟺   t ∉ E·Σ*
//! ∀l. l ∈ E → ¬suffix(l, t)    ⟺   t ∉ Σ*·E
//! ```

use crate::features::smt::domain::{BooleanFormula, RegexFormula, StringTerm, StringVar};
use crate::features::smt::ports::{SolverError, SolverResult};

/// Positive atom of a conjunct
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atom {
    Member(StringTerm, RegexFormula),
    Prefix(StringTerm, StringTerm),
    Suffix(StringTerm, StringTerm),
    Equal(StringTerm, StringTerm),
}

pub type Conjunct = Vec<Atom>;

/// Disjunction of conjuncts equivalent to `formula`
///
/// Fails with [`SolverError::ResourceLimit`] once more than `max_branches`
/// conjuncts would be produced.
pub fn disjunctive_normal_form(
    formula: &BooleanFormula,
    max_branches: usize,
) -> SolverResult<Vec<Conjunct>> {
    Normalizer { max_branches }.normalize(formula, true)
}

struct Normalizer {
    max_branches: usize,
}

impl Normalizer {
    fn normalize(&self, formula: &BooleanFormula, positive: bool) -> SolverResult<Vec<Conjunct>> {
        match formula {
            BooleanFormula::True => Ok(if positive { vec![Vec::new()] } else { Vec::new() }),
            BooleanFormula::False => Ok(if positive { Vec::new() } else { vec![Vec::new()] }),
            BooleanFormula::InRegex(term, regex) => {
                let regex = if positive {
                    regex.clone()
                } else {
                    regex.clone().complement()
                };
                Ok(vec![vec![Atom::Member(term.clone(), regex)]])
            }
            BooleanFormula::Prefix(a, b) => atom(positive, "prefix", || Atom::Prefix(a.clone(), b.clone())),
            BooleanFormula::Suffix(a, b) => atom(positive, "suffix", || Atom::Suffix(a.clone(), b.clone())),
            BooleanFormula::Equal(a, b) => atom(positive, "equality", || Atom::Equal(a.clone(), b.clone())),
            BooleanFormula::And(items) => {
                if positive {
                    self.product(items.iter().map(|item| (item, true)))
                } else {
                    self.sum(items.iter().map(|item| (item, false)))
                }
            }
            BooleanFormula::Or(items) => {
                if positive {
                    self.sum(items.iter().map(|item| (item, true)))
                } else {
                    self.product(items.iter().map(|item| (item, false)))
                }
            }
            BooleanFormula::Not(inner) => self.normalize(inner, !positive),
            BooleanFormula::Implies(premise, conclusion) => {
                let parts = [(premise.as_ref(), false), (conclusion.as_ref(), true)];
                if positive {
                    self.sum(parts.into_iter())
                } else {
                    let parts = [(premise.as_ref(), true), (conclusion.as_ref(), false)];
                    self.product(parts.into_iter())
                }
            }
            BooleanFormula::ForAll(var, body) => {
                if !positive {
                    return Err(SolverError::Unsupported(
                        "existential quantifier from a negated universal".to_string(),
                    ));
                }
                let atom = universal_membership(*var, body).ok_or_else(|| {
                    SolverError::Unsupported(format!("universal quantifier over {}", var))
                })?;
                Ok(vec![vec![atom]])
            }
        }
    }

    fn sum<'f>(
        &self,
        parts: impl Iterator<Item = (&'f BooleanFormula, bool)>,
    ) -> SolverResult<Vec<Conjunct>> {
        let mut out = Vec::new();
        for (part, positive) in parts {
            out.extend(self.normalize(part, positive)?);
            self.check_branches(out.len())?;
        }
        Ok(out)
    }

    fn product<'f>(
        &self,
        parts: impl Iterator<Item = (&'f BooleanFormula, bool)>,
    ) -> SolverResult<Vec<Conjunct>> {
        let mut out: Vec<Conjunct> = vec![Vec::new()];
        for (part, positive) in parts {
            let branches = self.normalize(part, positive)?;
            self.check_branches(out.len() * branches.len())?;
            out = out
                .iter()
                .flat_map(|left| {
                    branches.iter().map(move |right| {
                        let mut combined = left.clone();
                        combined.extend(right.iter().cloned());
                        combined
                    })
                })
                .collect();
            if out.is_empty() {
                break;
            }
        }
        Ok(out)
    }

    fn check_branches(&self, count: usize) -> SolverResult<()> {
        if count > self.max_branches {
            return Err(SolverError::ResourceLimit(format!(
                "more than {} disjunctive branches",
                self.max_branches
            )));
        }
        Ok(())
    }
}

fn atom(positive: bool, name: &str, build: impl FnOnce() -> Atom) -> SolverResult<Vec<Conjunct>> {
    if positive {
        Ok(vec![vec![build()]])
    } else {
        Err(SolverError::Unsupported(format!("negated {} atom", name)))
    }
}

/// Membership equivalent to `∀var. body`, when `body` has the lookaround shape
fn universal_membership(var: StringVar, body: &BooleanFormula) -> Option<Atom> {
    let (premise, negated_relation) = match body {
        BooleanFormula::Implies(premise, conclusion) => match conclusion.as_ref() {
            BooleanFormula::Not(relation) => (premise.as_ref(), relation.as_ref()),
            _ => return None,
        },
        BooleanFormula::Or(items) if items.len() == 2 => match (&items[0], &items[1]) {
            (BooleanFormula::Not(premise), BooleanFormula::Not(relation)) => {
                (premise.as_ref(), relation.as_ref())
            }
            _ => return None,
        },
        _ => return None,
    };
    let BooleanFormula::InRegex(StringTerm::Var(member), language) = premise else {
        return None;
    };
    if *member != var {
        return None;
    }
    let (witness, target, forbidden) = match negated_relation {
        BooleanFormula::Prefix(witness, target) => {
            (witness, target, language.clone().followed_by_anything())
        }
        BooleanFormula::Suffix(witness, target) => {
            (witness, target, language.clone().preceded_by_anything())
        }
        _ => return None,
    };
    if *witness != StringTerm::Var(var) || target.flatten().contains(&var) {
        return None;
    }
    Some(Atom::Member(target.clone(), forbidden.complement()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(n: u32, regex: RegexFormula) -> BooleanFormula {
        BooleanFormula::in_regex(StringVar(n), regex)
    }

    #[test]
    fn test_or_inside_and_distributes() {
        let formula = BooleanFormula::and(vec![
            member(0, RegexFormula::All),
            BooleanFormula::or(vec![
                member(1, RegexFormula::literal("a")),
                member(1, RegexFormula::literal("b")),
            ]),
        ]);
        let dnf = disjunctive_normal_form(&formula, 16).expect("within limits");
        assert_eq!(dnf.len(), 2);
        assert!(dnf.iter().all(|conjunct| conjunct.len() == 2));
    }

    #[test]
    fn test_negated_membership_is_complement() {
        let formula = member(0, RegexFormula::literal("a")).not();
        let dnf = disjunctive_normal_form(&formula, 16).expect("within limits");
        assert_eq!(
            dnf,
            vec![vec![Atom::Member(
                StringVar(0).into(),
                RegexFormula::literal("a").complement()
            )]]
        );
    }

    #[test]
    fn test_negative_lookahead_quantifier_becomes_membership() {
        let formula = BooleanFormula::for_all(
            StringVar(1),
            member(1, RegexFormula::literal("a"))
                .implies(BooleanFormula::prefix(StringVar(1), StringVar(2)).not()),
        );
        let dnf = disjunctive_normal_form(&formula, 16).expect("within limits");
        assert_eq!(
            dnf,
            vec![vec![Atom::Member(
                StringVar(2).into(),
                RegexFormula::literal("a").followed_by_anything().complement()
            )]]
        );
    }

    #[test]
    fn test_unrecognized_quantifier_is_unsupported() {
        let formula = BooleanFormula::for_all(StringVar(1), member(1, RegexFormula::All));
        assert!(matches!(
            disjunctive_normal_form(&formula, 16),
            Err(SolverError::Unsupported(_))
        ));
    }

    #[test]
    fn test_branch_limit() {
        let choice = |n| {
            BooleanFormula::or(vec![
                member(n, RegexFormula::literal("a")),
                member(n, RegexFormula::literal("b")),
            ])
        };
        let formula = BooleanFormula::and((0..5).map(choice).collect());
        assert!(matches!(
            disjunctive_normal_form(&formula, 16),
            Err(SolverError::ResourceLimit(_))
        ));
        assert_eq!(disjunctive_normal_form(&formula, 32).map(|d| d.len()), Ok(32));
    }
}
