//! Regex satisfiability checking
//!
//! Translates a parsed regex into a string-constraint query and asks the
//! solver whether any input satisfies it. Translation failures return the
//! caller's default answer; solver failures count as satisfiable so that
//! findings built on "can never match" stay free of false positives.

use crate::features::parsing::domain::RegexParseResult;
use crate::features::smt::domain::{
    BooleanFormula, Constraint, MatchType, RegexFormula, TranslationError,
};
use crate::features::smt::infrastructure::concatenation::ConcatenationBuilder;
use crate::features::smt::infrastructure::{
    continuation_constraints, ConstraintTranslator, FormulaManager,
};
use crate::features::smt::ports::{ProverEnvironment, SolverContext};
use tracing::{debug, warn};

pub struct SatisfiabilityChecker<C: SolverContext> {
    context: C,
    manager: FormulaManager,
}

impl<C: SolverContext> SatisfiabilityChecker<C> {
    pub fn new(context: C) -> Self {
        Self {
            context,
            manager: FormulaManager::new(),
        }
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    /// Can `regex` match some input under `match_type`
    ///
    /// `default_answer` is returned when the regex uses constructs the
    /// translation does not cover.
    pub fn check(&mut self, regex: &RegexParseResult, match_type: MatchType, default_answer: bool) -> bool {
        let query = match self.query(regex, match_type) {
            Ok(query) => query,
            Err(TranslationError::Unsupported(what)) => {
                debug!(regex = regex.source().text(), %what, "regex outside the supported fragment");
                return default_answer;
            }
        };

        let mut prover = self.context.new_prover_environment();
        prover.add_constraint(query);
        match prover.is_unsat() {
            Ok(unsat) => {
                debug!(
                    regex = regex.source().text(),
                    solver = self.context.name(),
                    satisfiable = !unsat,
                    "satisfiability decided"
                );
                !unsat
            }
            Err(err) => {
                warn!(regex = regex.source().text(), error = %err, "solver gave up, assuming satisfiable");
                true
            }
        }
    }

    /// Formula that is satisfiable iff `regex` can match some input
    pub fn query(&mut self, regex: &RegexParseResult, match_type: MatchType) -> Result<BooleanFormula, TranslationError> {
        let translated = ConstraintTranslator::new(regex, &mut self.manager).translate(regex.root())?;
        let wrapped = if match_type.is_full() {
            translated
        } else {
            let mut builder = ConcatenationBuilder::new(&mut self.manager);
            builder.push(Constraint::regex(RegexFormula::All));
            builder.push(translated);
            builder.push(Constraint::regex(RegexFormula::All));
            builder.finish()
        };
        let root = match wrapped {
            Constraint::Regex(regex) => self.manager.simple_constraint(regex.formula),
            Constraint::String(string) => string,
        };

        let input = self.manager.fresh_var();
        let mut conjuncts = vec![BooleanFormula::equal(input, root.var.clone()), root.formula.clone()];
        conjuncts.extend(continuation_constraints(&root));
        Ok(BooleanFormula::and(conjuncts))
    }
}
