//! Concatenation of translated sequence items
//!
//! Regex constraints are buffered and concatenated as long as possible;
//! adjacent literal characters become one literal and empty-string
//! items vanish. A string constraint
//! flushes the buffer into a fresh variable so the result stays an ordered
//! list of string elements.

use super::formula_manager::FormulaManager;
use crate::features::smt::domain::{
    BooleanFormula, Constraint, RegexFormula, StringConstraint, StringShape, StringTerm,
};

pub struct ConcatenationBuilder<'m> {
    manager: &'m mut FormulaManager,
    regex_buffer: Vec<RegexFormula>,
    pending_chars: String,
    elements: Vec<StringConstraint>,
}

impl<'m> ConcatenationBuilder<'m> {
    pub fn new(manager: &'m mut FormulaManager) -> Self {
        Self {
            manager,
            regex_buffer: Vec::new(),
            pending_chars: String::new(),
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, constraint: Constraint) {
        match constraint {
            Constraint::Regex(regex) => match regex.simple_char {
                Some(c) => self.pending_chars.push(c),
                None if regex.formula == RegexFormula::epsilon() => {}
                None => {
                    self.flush_chars();
                    self.regex_buffer.push(regex.formula);
                }
            },
            Constraint::String(string) => {
                self.flush_regex();
                self.elements.push(string);
            }
        }
    }

    fn flush_chars(&mut self) {
        if !self.pending_chars.is_empty() {
            let literal = std::mem::take(&mut self.pending_chars);
            self.regex_buffer.push(RegexFormula::Literal(literal));
        }
    }

    fn flush_regex(&mut self) {
        self.flush_chars();
        if self.regex_buffer.is_empty() {
            return;
        }
        let regex = RegexFormula::concat(std::mem::take(&mut self.regex_buffer));
        let element = self.manager.simple_constraint(regex);
        self.elements.push(element);
    }

    pub fn finish(mut self) -> Constraint {
        if self.elements.is_empty() {
            self.flush_chars();
            return Constraint::regex(RegexFormula::concat(self.regex_buffer));
        }
        self.flush_regex();
        let var = StringTerm::concat(self.elements.iter().map(|e| e.var.clone()).collect());
        let formula = BooleanFormula::and(self.elements.iter().map(|e| e.formula.clone()).collect());
        Constraint::String(StringConstraint {
            var,
            formula,
            shape: StringShape::Concatenation(self.elements),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::smt::domain::RegexConstraint;

    #[test]
    fn test_characters_batch_into_literal() {
        let mut manager = FormulaManager::new();
        let mut builder = ConcatenationBuilder::new(&mut manager);
        builder.push(Constraint::Regex(RegexConstraint::character('a')));
        builder.push(Constraint::Regex(RegexConstraint::character('b')));
        builder.push(Constraint::regex(RegexFormula::AllChar));
        builder.push(Constraint::Regex(RegexConstraint::character('c')));
        assert_eq!(
            builder.finish(),
            Constraint::regex(RegexFormula::Concat(vec![
                RegexFormula::literal("ab"),
                RegexFormula::AllChar,
                RegexFormula::literal("c"),
            ]))
        );
    }

    #[test]
    fn test_string_element_flushes_buffer() {
        let mut manager = FormulaManager::new();
        let lookaround = manager.simple_constraint(RegexFormula::epsilon());
        let mut builder = ConcatenationBuilder::new(&mut manager);
        builder.push(Constraint::Regex(RegexConstraint::character('a')));
        builder.push(Constraint::String(lookaround));
        builder.push(Constraint::Regex(RegexConstraint::character('b')));
        let Constraint::String(result) = builder.finish() else {
            panic!("expected string constraint");
        };
        let StringShape::Concatenation(elements) = &result.shape else {
            panic!("expected concatenation");
        };
        assert_eq!(elements.len(), 3);
        assert_eq!(result.var.flatten().len(), 3);
    }
}
