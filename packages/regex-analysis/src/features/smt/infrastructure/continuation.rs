//! Lookaround continuation binding
//!
//! Each lookaround (and possessive repetition) owns a continuation variable
//! standing for the text on its side of the match. Two passes bind them:
//! lookaheads visit concatenation elements back to front so that every
//! lookahead sees the elements already collected to its right, lookbehinds
//! visit front to back. Disjunction alternatives each see the same
//! surroundings. A lookaround with nothing on its side gets the empty string.

use crate::features::parsing::domain::LookDirection;
use crate::features::smt::domain::{BooleanFormula, RegexFormula, StringConstraint, StringShape, StringTerm};

/// Equalities binding every continuation variable under `root`
pub fn continuation_constraints(root: &StringConstraint) -> Vec<BooleanFormula> {
    let mut out = Vec::new();
    for direction in [LookDirection::Ahead, LookDirection::Behind] {
        let mut visited = Vec::new();
        collect(root, direction, &mut visited, &mut out);
    }
    out
}

/// `visited` holds the terms already passed, farthest first
fn collect(
    constraint: &StringConstraint,
    direction: LookDirection,
    visited: &mut Vec<StringTerm>,
    out: &mut Vec<BooleanFormula>,
) {
    match &constraint.shape {
        StringShape::Simple => {}
        StringShape::Concatenation(elements) => {
            let ordered: Vec<&StringConstraint> = match direction {
                LookDirection::Ahead => elements.iter().rev().collect(),
                LookDirection::Behind => elements.iter().collect(),
            };
            let depth = visited.len();
            for element in ordered {
                collect(element, direction, visited, out);
                visited.push(element.var.clone());
            }
            visited.truncate(depth);
        }
        StringShape::Disjunction(alternatives) => {
            for alternative in alternatives {
                collect(alternative, direction, visited, out);
            }
        }
        StringShape::Lookaround {
            direction: own,
            continuation,
        } => {
            if *own != direction {
                return;
            }
            if visited.is_empty() {
                out.push(BooleanFormula::in_regex(*continuation, RegexFormula::epsilon()));
                return;
            }
            let mut terms = visited.clone();
            if direction == LookDirection::Ahead {
                terms.reverse();
            }
            out.push(BooleanFormula::equal(*continuation, StringTerm::concat(terms)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::smt::domain::StringVar;

    fn simple(n: u32) -> StringConstraint {
        StringConstraint {
            var: StringVar(n).into(),
            formula: BooleanFormula::True,
            shape: StringShape::Simple,
        }
    }

    fn look(n: u32, direction: LookDirection, continuation: u32) -> StringConstraint {
        StringConstraint {
            var: StringVar(n).into(),
            formula: BooleanFormula::True,
            shape: StringShape::Lookaround {
                direction,
                continuation: StringVar(continuation),
            },
        }
    }

    fn concat(elements: Vec<StringConstraint>) -> StringConstraint {
        StringConstraint {
            var: StringTerm::concat(elements.iter().map(|e| e.var.clone()).collect()),
            formula: BooleanFormula::True,
            shape: StringShape::Concatenation(elements),
        }
    }

    #[test]
    fn test_lookahead_sees_right_side_in_order() {
        let root = concat(vec![
            simple(0),
            look(1, LookDirection::Ahead, 9),
            simple(2),
            concat(vec![simple(3), simple(4)]),
        ]);
        let constraints = continuation_constraints(&root);
        assert_eq!(
            constraints,
            vec![BooleanFormula::equal(
                StringVar(9),
                StringTerm::concat(vec![
                    StringVar(2).into(),
                    StringTerm::concat(vec![StringVar(3).into(), StringVar(4).into()]),
                ])
            )]
        );
    }

    #[test]
    fn test_lookbehind_sees_left_side_in_order() {
        let root = concat(vec![simple(0), simple(1), look(2, LookDirection::Behind, 9)]);
        let constraints = continuation_constraints(&root);
        assert_eq!(
            constraints,
            vec![BooleanFormula::equal(
                StringVar(9),
                StringTerm::concat(vec![StringVar(0).into(), StringVar(1).into()])
            )]
        );
    }

    #[test]
    fn test_trailing_lookahead_gets_empty_continuation() {
        let root = concat(vec![simple(0), look(1, LookDirection::Ahead, 9)]);
        assert_eq!(
            continuation_constraints(&root),
            vec![BooleanFormula::in_regex(StringVar(9), RegexFormula::epsilon())]
        );
    }
}
