//! Fresh string variables

use crate::features::smt::domain::{BooleanFormula, RegexFormula, StringConstraint, StringShape, StringVar};

/// Hands out fresh variables `s0`, `s1`, ...; one per checker
#[derive(Debug, Default)]
pub struct FormulaManager {
    next: u32,
}

impl FormulaManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh_var(&mut self) -> StringVar {
        let var = StringVar(self.next);
        self.next += 1;
        var
    }

    /// Fresh variable constrained to `regex`
    pub fn simple_constraint(&mut self, regex: RegexFormula) -> StringConstraint {
        let var = self.fresh_var();
        StringConstraint {
            var: var.into(),
            formula: BooleanFormula::in_regex(var, regex),
            shape: StringShape::Simple,
        }
    }
}
