//! Disjunction of translated alternatives

use super::formula_manager::FormulaManager;
use crate::features::smt::domain::{
    BooleanFormula, Constraint, RegexFormula, StringConstraint, StringShape,
};

/// Regex union when every alternative is a regex; otherwise a fresh variable
/// equal to one of the alternatives
pub fn disjunction(manager: &mut FormulaManager, alternatives: Vec<Constraint>) -> Constraint {
    if alternatives.iter().all(Constraint::is_regex) {
        let formulas = alternatives
            .into_iter()
            .filter_map(|alternative| match alternative {
                Constraint::Regex(regex) => Some(regex.formula),
                Constraint::String(_) => None,
            })
            .collect();
        return Constraint::regex(RegexFormula::union(formulas));
    }

    let elements: Vec<StringConstraint> = alternatives
        .into_iter()
        .map(|alternative| match alternative {
            Constraint::Regex(regex) => manager.simple_constraint(regex.formula),
            Constraint::String(string) => string,
        })
        .collect();
    let union_var = manager.fresh_var();
    let formula = BooleanFormula::or(
        elements
            .iter()
            .map(|element| {
                BooleanFormula::and(vec![
                    BooleanFormula::equal(union_var, element.var.clone()),
                    element.formula.clone(),
                ])
            })
            .collect(),
    );
    Constraint::String(StringConstraint {
        var: union_var.into(),
        formula,
        shape: StringShape::Disjunction(elements),
    })
}
