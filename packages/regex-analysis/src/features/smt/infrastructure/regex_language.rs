//! Character-level languages
//!
//! Characters, character classes, the dot and escaped classes all denote
//! sets of single characters. The exact set depends on the node's flags:
//! case-insensitivity folds ASCII letters (and single characters under
//! unicode-case), the dot excludes line terminators unless dot-all is on.

use crate::features::automata::CharSet;
use crate::features::parsing::domain::{EscapedClassKind, FlagSet, NodeId, NodeKind, RegexParseResult};
use crate::features::smt::domain::{RegexConstraint, RegexFormula, TranslationError, MAX_CODE_POINT};

type LanguageResult<T> = Result<T, TranslationError>;

const LINE_TERMINATORS: [u32; 5] = [0x0A, 0x0D, 0x85, 0x2028, 0x2029];

/// Union of ranges for a character set
pub fn set_formula(set: &CharSet) -> RegexFormula {
    RegexFormula::union(
        set.ranges()
            .iter()
            .map(|(lo, hi)| {
                if lo == hi {
                    char::from_u32(*lo)
                        .map(RegexFormula::char)
                        .unwrap_or(RegexFormula::Range(*lo, *hi))
                } else {
                    RegexFormula::Range(*lo, *hi)
                }
            })
            .collect(),
    )
}

fn chars_set(chars: &[u32]) -> CharSet {
    CharSet::from_ranges(chars.iter().map(|c| (*c, *c)).collect())
}

/// Literal character, folded according to `flags`
pub fn character_language(code_point: u32, flags: FlagSet) -> LanguageResult<RegexConstraint> {
    let c = char::from_u32(code_point)
        .ok_or_else(|| TranslationError::unsupported(format!("code point {:#x}", code_point)))?;
    if !flags.contains(FlagSet::CASE_INSENSITIVE) {
        return Ok(RegexConstraint::character(c));
    }
    let variants = case_variants(c, flags);
    if variants.len() == 1 {
        return Ok(RegexConstraint::character(c));
    }
    Ok(RegexConstraint::new(set_formula(&chars_set(&variants))))
}

fn case_variants(c: char, flags: FlagSet) -> Vec<u32> {
    let mut variants = vec![c as u32];
    if c.is_ascii_alphabetic() {
        variants.push(c.to_ascii_lowercase() as u32);
        variants.push(c.to_ascii_uppercase() as u32);
    } else if flags.contains(FlagSet::UNICODE_CASE) && !c.is_ascii() {
        for mapped in [single(c.to_lowercase()), single(c.to_uppercase())].into_iter().flatten() {
            variants.push(mapped as u32);
        }
    }
    variants.sort_unstable();
    variants.dedup();
    variants
}

fn single(mut iter: impl Iterator<Item = char>) -> Option<char> {
    let first = iter.next()?;
    match iter.next() {
        Some(_) => None,
        None => Some(first),
    }
}

fn range_set(lower: u32, upper: u32, flags: FlagSet) -> LanguageResult<CharSet> {
    let base = CharSet::range(lower, upper);
    if !flags.contains(FlagSet::CASE_INSENSITIVE) {
        return Ok(base);
    }
    if flags.contains(FlagSet::UNICODE_CASE) && upper > 0x7F {
        return Err(TranslationError::unsupported(
            "unicode case folding of a non-ASCII range",
        ));
    }
    let lowercase = base.intersect(&CharSet::range('a' as u32, 'z' as u32));
    let uppercase = base.intersect(&CharSet::range('A' as u32, 'Z' as u32));
    let shift = |set: &CharSet, up: bool| {
        CharSet::from_ranges(
            set.ranges()
                .iter()
                .map(|(lo, hi)| if up { (lo - 32, hi - 32) } else { (lo + 32, hi + 32) })
                .collect(),
        )
    };
    Ok(base
        .union(&shift(&lowercase, true))
        .union(&shift(&uppercase, false)))
}

/// `.` under `flags`
pub fn dot_language(flags: FlagSet) -> RegexFormula {
    if flags.contains(FlagSet::DOTALL) {
        return RegexFormula::AllChar;
    }
    let excluded = if flags.contains(FlagSet::UNIX_LINES) {
        chars_set(&[0x0A])
    } else {
        chars_set(&LINE_TERMINATORS)
    };
    set_formula(&excluded.complement(MAX_CODE_POINT))
}

/// `\d`, `\w`, `\s`, `\h`, `\v` and POSIX `\p{..}` classes
pub fn escaped_class_set(kind: &EscapedClassKind, flags: FlagSet) -> LanguageResult<CharSet> {
    let unicode_classes = flags.contains(FlagSet::UNICODE_CHARACTER_CLASS);
    let ranges: Vec<(u32, u32)> = match kind {
        EscapedClassKind::Digit if !unicode_classes => vec![r('0', '9')],
        EscapedClassKind::Word if !unicode_classes => {
            vec![r('a', 'z'), r('A', 'Z'), r('0', '9'), r('_', '_')]
        }
        EscapedClassKind::Whitespace if !unicode_classes => {
            vec![(0x09, 0x0D), (0x20, 0x20)]
        }
        EscapedClassKind::HorizontalWhitespace => vec![
            (0x09, 0x09),
            (0x20, 0x20),
            (0xA0, 0xA0),
            (0x1680, 0x1680),
            (0x180E, 0x180E),
            (0x2000, 0x200A),
            (0x202F, 0x202F),
            (0x205F, 0x205F),
            (0x3000, 0x3000),
        ],
        EscapedClassKind::VerticalWhitespace => {
            vec![(0x0A, 0x0D), (0x85, 0x85), (0x2028, 0x2029)]
        }
        EscapedClassKind::Property(name) if !unicode_classes => posix_property(name)?,
        other => {
            return Err(TranslationError::unsupported(format!(
                "unicode character class {:?}",
                other
            )))
        }
    };
    Ok(CharSet::from_ranges(ranges))
}

fn r(lo: char, hi: char) -> (u32, u32) {
    (lo as u32, hi as u32)
}

fn posix_property(name: &str) -> LanguageResult<Vec<(u32, u32)>> {
    let name = name.strip_prefix("Is").unwrap_or(name);
    let ranges = match name {
        "Lower" => vec![r('a', 'z')],
        "Upper" => vec![r('A', 'Z')],
        "ASCII" => vec![(0x00, 0x7F)],
        "Alpha" => vec![r('a', 'z'), r('A', 'Z')],
        "Digit" => vec![r('0', '9')],
        "Alnum" => vec![r('a', 'z'), r('A', 'Z'), r('0', '9')],
        "Punct" => vec![r('!', '/'), r(':', '@'), r('[', '`'), r('{', '~')],
        "Graph" => vec![r('!', '~')],
        "Print" => vec![r(' ', '~')],
        "Blank" => vec![(0x09, 0x09), (0x20, 0x20)],
        "Cntrl" => vec![(0x00, 0x1F), (0x7F, 0x7F)],
        "XDigit" => vec![r('0', '9'), r('a', 'f'), r('A', 'F')],
        "Space" => vec![(0x09, 0x0D), (0x20, 0x20)],
        other => {
            return Err(TranslationError::unsupported(format!(
                "character property \\p{{{}}}",
                other
            )))
        }
    };
    Ok(ranges)
}

/// Language of one escaped class node
pub fn escaped_class_language(
    kind: &EscapedClassKind,
    negated: bool,
    flags: FlagSet,
) -> LanguageResult<RegexFormula> {
    let set = escaped_class_set(kind, flags)?;
    Ok(if negated {
        set_formula(&set.complement(MAX_CODE_POINT))
    } else {
        set_formula(&set)
    })
}

/// Set of characters matched by a character class node or one of its items
pub fn class_set(regex: &RegexParseResult, id: NodeId) -> LanguageResult<CharSet> {
    let node = regex.node(id);
    match &node.kind {
        NodeKind::Character { code_point, .. } => {
            let c = char::from_u32(*code_point).ok_or_else(|| {
                TranslationError::unsupported(format!("code point {:#x}", code_point))
            })?;
            if node.flags.contains(FlagSet::CASE_INSENSITIVE) {
                Ok(chars_set(&case_variants(c, node.flags)))
            } else {
                Ok(CharSet::single(*code_point))
            }
        }
        NodeKind::CharacterRange { lower, upper } => range_set(*lower, *upper, node.flags),
        NodeKind::CharacterClassUnion { items } => {
            let mut set = CharSet::empty();
            for item in items {
                set = set.union(&class_set(regex, *item)?);
            }
            Ok(set)
        }
        NodeKind::CharacterClassIntersection { items } => {
            let mut set = CharSet::range(0, MAX_CODE_POINT);
            for item in items {
                set = set.intersect(&class_set(regex, *item)?);
            }
            Ok(set)
        }
        NodeKind::CharacterClass { contents, negated } => {
            let inner = class_set(regex, *contents)?;
            Ok(if *negated {
                inner.complement(MAX_CODE_POINT)
            } else {
                inner
            })
        }
        NodeKind::EscapedCharacterClass { kind, negated } => {
            let set = escaped_class_set(kind, node.flags)?;
            Ok(if *negated {
                set.complement(MAX_CODE_POINT)
            } else {
                set
            })
        }
        other => Err(TranslationError::unsupported(format!(
            "{:?} inside a character class",
            other
        ))),
    }
}

/// Language of a character class node
pub fn class_language(regex: &RegexParseResult, id: NodeId) -> LanguageResult<RegexFormula> {
    Ok(set_formula(&class_set(regex, id)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_character() {
        let constraint = character_language('a' as u32, FlagSet::new(FlagSet::CASE_INSENSITIVE)).unwrap();
        assert_eq!(constraint.simple_char, None);
        let plain = character_language('a' as u32, FlagSet::empty()).unwrap();
        assert_eq!(plain.simple_char, Some('a'));
        let digit = character_language('1' as u32, FlagSet::new(FlagSet::CASE_INSENSITIVE)).unwrap();
        assert_eq!(digit.simple_char, Some('1'));
    }

    #[test]
    fn test_case_insensitive_range() {
        let set = range_set('x' as u32, 'z' as u32, FlagSet::new(FlagSet::CASE_INSENSITIVE)).unwrap();
        assert!(set.contains('Y' as u32));
        assert!(set.contains('y' as u32));
        assert!(!set.contains('w' as u32));
    }

    #[test]
    fn test_word_class() {
        let set = escaped_class_set(&EscapedClassKind::Word, FlagSet::empty()).unwrap();
        assert!(set.contains('_' as u32));
        assert!(set.contains('Q' as u32));
        assert!(!set.contains('-' as u32));
        assert!(escaped_class_set(
            &EscapedClassKind::Word,
            FlagSet::new(FlagSet::UNICODE_CHARACTER_CLASS)
        )
        .is_err());
    }

    #[test]
    fn test_unknown_property_unsupported() {
        assert!(escaped_class_set(&EscapedClassKind::Property("Lu".into()), FlagSet::empty()).is_err());
        assert!(escaped_class_set(&EscapedClassKind::Property("Alpha".into()), FlagSet::empty()).is_ok());
    }
}
