//! Syntax tree to constraint translation
//!
//! One rule per node kind, applied bottom-up. Constructs outside the
//! decidable fragment (back-references, conditionals, unicode tables) fail
//! with [`TranslationError::Unsupported`] instead of being approximated.
//!
//! Inside negative lookarounds and possessive elements the element language
//! occurs negated, so approximations that only widen a language (boundaries
//! as the empty string, atomic groups as plain groups) are rejected there.

use super::concatenation::ConcatenationBuilder;
use super::disjunction::disjunction;
use super::formula_manager::FormulaManager;
use super::regex_language::{
    character_language, class_language, dot_language, escaped_class_language,
};
use crate::features::parsing::domain::{
    GroupKind, LookDirection, NodeId, NodeKind, Polarity, Quantifier, RegexParseResult,
};
use crate::features::smt::domain::{
    BooleanFormula, Constraint, RegexFormula, StringConstraint, StringShape, TranslationError,
};

pub type TranslationResult<T> = Result<T, TranslationError>;

pub struct ConstraintTranslator<'a> {
    regex: &'a RegexParseResult,
    manager: &'a mut FormulaManager,
    negated_depth: usize,
}

impl<'a> ConstraintTranslator<'a> {
    pub fn new(regex: &'a RegexParseResult, manager: &'a mut FormulaManager) -> Self {
        Self {
            regex,
            manager,
            negated_depth: 0,
        }
    }

    /// Translator for a pattern whose language is used complemented
    pub fn negated(regex: &'a RegexParseResult, manager: &'a mut FormulaManager) -> Self {
        Self {
            regex,
            manager,
            negated_depth: 1,
        }
    }

    pub fn translate(&mut self, id: NodeId) -> TranslationResult<Constraint> {
        let node = self.regex.node(id);
        let flags = node.flags;
        match &node.kind {
            NodeKind::Character { code_point, .. } => {
                Ok(Constraint::Regex(character_language(*code_point, flags)?))
            }
            NodeKind::Sequence { items } => {
                let mut translated = Vec::with_capacity(items.len());
                for item in items {
                    translated.push(self.translate(*item)?);
                }
                let mut builder = ConcatenationBuilder::new(self.manager);
                for constraint in translated {
                    builder.push(constraint);
                }
                Ok(builder.finish())
            }
            NodeKind::Disjunction { alternatives } => {
                let mut translated = Vec::with_capacity(alternatives.len());
                for alternative in alternatives {
                    translated.push(self.translate(*alternative)?);
                }
                Ok(disjunction(self.manager, translated))
            }
            NodeKind::Group { kind, element, .. } => match kind {
                GroupKind::LookAround { direction, polarity } => {
                    self.lookaround(*direction, *polarity, *element)
                }
                GroupKind::Atomic if self.negated_depth > 0 => Err(TranslationError::unsupported(
                    "atomic group in a negated context",
                )),
                _ => match element {
                    Some(element) => self.translate(*element),
                    None => Ok(Constraint::regex(RegexFormula::epsilon())),
                },
            },
            NodeKind::Repetition { element, quantifier } => self.repetition(*element, quantifier),
            NodeKind::CharacterClass { .. }
            | NodeKind::CharacterRange { .. }
            | NodeKind::CharacterClassUnion { .. }
            | NodeKind::CharacterClassIntersection { .. } => {
                Ok(Constraint::regex(class_language(self.regex, id)?))
            }
            NodeKind::Dot => Ok(Constraint::regex(dot_language(flags))),
            NodeKind::EscapedCharacterClass { kind, negated } => Ok(Constraint::regex(
                escaped_class_language(kind, *negated, flags)?,
            )),
            NodeKind::Boundary(kind) => {
                if self.negated_depth > 0 {
                    return Err(TranslationError::unsupported(format!(
                        "boundary {:?} in a negated context",
                        kind
                    )));
                }
                Ok(Constraint::regex(RegexFormula::epsilon()))
            }
            NodeKind::MiscEscapeSequence => Err(TranslationError::unsupported(format!(
                "escape sequence {}",
                self.regex.text(id)
            ))),
            NodeKind::BackReference(_) => Err(TranslationError::unsupported("back-reference")),
            NodeKind::ConditionalSubpattern { .. } => {
                Err(TranslationError::unsupported("conditional subpattern"))
            }
        }
    }

    fn translate_negated(&mut self, id: NodeId) -> TranslationResult<Constraint> {
        self.negated_depth += 1;
        let result = self.translate(id);
        self.negated_depth -= 1;
        result
    }

    fn element_language(&mut self, element: Option<NodeId>, negated: bool) -> TranslationResult<RegexFormula> {
        let constraint = match element {
            None => return Ok(RegexFormula::epsilon()),
            Some(id) if negated => self.translate_negated(id)?,
            Some(id) => self.translate(id)?,
        };
        match constraint {
            Constraint::Regex(regex) => Ok(regex.formula),
            Constraint::String(_) => Err(TranslationError::unsupported(
                "lookaround or possessive quantifier nested in a lookaround or repetition",
            )),
        }
    }

    fn lookaround(
        &mut self,
        direction: LookDirection,
        polarity: Polarity,
        element: Option<NodeId>,
    ) -> TranslationResult<Constraint> {
        let language = self.element_language(element, polarity == Polarity::Negative)?;

        let dummy = self.manager.fresh_var();
        let witness = self.manager.fresh_var();
        let continuation = self.manager.fresh_var();
        let relation = match direction {
            LookDirection::Ahead => BooleanFormula::prefix(witness, continuation),
            LookDirection::Behind => BooleanFormula::suffix(witness, continuation),
        };
        let assertion = match polarity {
            Polarity::Positive => {
                BooleanFormula::and(vec![BooleanFormula::in_regex(witness, language), relation])
            }
            Polarity::Negative => BooleanFormula::for_all(
                witness,
                BooleanFormula::in_regex(witness, language).implies(relation.not()),
            ),
        };

        Ok(Constraint::String(StringConstraint {
            var: dummy.into(),
            formula: BooleanFormula::and(vec![
                BooleanFormula::in_regex(dummy, RegexFormula::epsilon()),
                assertion,
            ]),
            shape: StringShape::Lookaround {
                direction,
                continuation,
            },
        }))
    }

    fn repetition(&mut self, element: NodeId, quantifier: &Quantifier) -> TranslationResult<Constraint> {
        let possessive = quantifier.is_possessive();
        if possessive && !quantifier.is_open_ended() && self.negated_depth > 0 {
            return Err(TranslationError::unsupported(
                "bounded possessive quantifier in a negated context",
            ));
        }
        let encode_possessive = possessive && quantifier.is_open_ended();
        let language = self.element_language(Some(element), encode_possessive)?;
        let repeated = repetition_language(language.clone(), quantifier);
        if !encode_possessive {
            return Ok(Constraint::regex(repeated));
        }

        // the repetition only stops where no further non-empty iteration can start
        let repeated_var = self.manager.fresh_var();
        let witness = self.manager.fresh_var();
        let continuation = self.manager.fresh_var();
        let iteration = language.difference(RegexFormula::epsilon());
        Ok(Constraint::String(StringConstraint {
            var: repeated_var.into(),
            formula: BooleanFormula::and(vec![
                BooleanFormula::in_regex(repeated_var, repeated),
                BooleanFormula::for_all(
                    witness,
                    BooleanFormula::in_regex(witness, iteration)
                        .implies(BooleanFormula::prefix(witness, continuation).not()),
                ),
            ]),
            shape: StringShape::Lookaround {
                direction: LookDirection::Ahead,
                continuation,
            },
        }))
    }
}

/// Language of `element` repeated as `quantifier` allows
pub fn repetition_language(element: RegexFormula, quantifier: &Quantifier) -> RegexFormula {
    let min = quantifier.minimum_repetitions();
    match quantifier.maximum_repetitions() {
        None if element == RegexFormula::AllChar && min == 0 => RegexFormula::All,
        None => match min {
            0 => element.closure(),
            1 => element.cross(),
            n => RegexFormula::concat(vec![element.clone().times(n), element.closure()]),
        },
        Some(max) => {
            let optional = max.saturating_sub(min);
            RegexFormula::concat(vec![
                element.clone().times(min),
                element.optional().times(optional),
            ])
        }
    }
}
