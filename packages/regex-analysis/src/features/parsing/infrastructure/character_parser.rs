//! Character layer
//!
//! Turns the regex text into a sequence of source characters, each with the
//! byte range it was read from. With [`RegexFeature::JavaUnicodeEscapes`]
//! enabled, `\uXXXX` escapes (with one or more `u`) are decoded here, before
//! the regex grammar sees them; a backslash only starts such an escape when it
//! is not itself escaped.

use crate::features::parsing::domain::{RegexFeature, RegexSource};
use crate::shared::models::IndexRange;

/// One logical character of the regex source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceCharacter {
    pub value: char,
    pub range: IndexRange,
    /// Decoded from a unicode escape by this layer
    pub is_unicode_escape: bool,
}

pub fn decode_characters(source: &RegexSource) -> Vec<SourceCharacter> {
    let text = source.text();
    let decode_unicode = source.supports(RegexFeature::JavaUnicodeEscapes);
    let indexed: Vec<(usize, char)> = text.char_indices().collect();
    let mut characters = Vec::with_capacity(indexed.len());
    let mut preceding_backslashes = 0usize;
    let mut i = 0;

    while i < indexed.len() {
        let (offset, ch) = indexed[i];
        if decode_unicode && ch == '\\' && preceding_backslashes % 2 == 0 {
            if let Some((value, consumed)) = unicode_escape_at(&indexed, i) {
                let end = indexed
                    .get(i + consumed)
                    .map(|(o, _)| *o)
                    .unwrap_or(text.len());
                characters.push(SourceCharacter {
                    value,
                    range: IndexRange::new(offset as isize, end as isize),
                    is_unicode_escape: true,
                });
                preceding_backslashes = 0;
                i += consumed;
                continue;
            }
        }

        preceding_backslashes = if ch == '\\' { preceding_backslashes + 1 } else { 0 };
        let end = offset + ch.len_utf8();
        characters.push(SourceCharacter {
            value: ch,
            range: IndexRange::new(offset as isize, end as isize),
            is_unicode_escape: false,
        });
        i += 1;
    }

    characters
}

/// `\u+XXXX` starting at `start`; returns the character and the number of
/// source characters consumed
fn unicode_escape_at(chars: &[(usize, char)], start: usize) -> Option<(char, usize)> {
    let mut i = start + 1;
    let mut u_count = 0;
    while chars.get(i).map(|(_, c)| *c) == Some('u') {
        u_count += 1;
        i += 1;
    }
    if u_count == 0 {
        return None;
    }
    let mut value = 0u32;
    for _ in 0..4 {
        let digit = chars.get(i)?.1.to_digit(16)?;
        value = value * 16 + digit;
        i += 1;
    }
    char::from_u32(value).map(|c| (c, i - start))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(text: &str) -> String {
        decode_characters(&RegexSource::java(text))
            .iter()
            .map(|c| c.value)
            .collect()
    }

    #[test]
    fn test_plain_characters_keep_ranges() {
        let chars = decode_characters(&RegexSource::java("aé"));
        assert_eq!(chars[0].range, IndexRange::new(0, 1));
        assert_eq!(chars[1].range, IndexRange::new(1, 3));
    }

    #[test]
    fn test_multi_u_escape_decoded() {
        let chars = decode_characters(&RegexSource::java("\\uuu0041b"));
        assert_eq!(chars.len(), 2);
        assert_eq!(chars[0].value, 'A');
        assert!(chars[0].is_unicode_escape);
        assert_eq!(chars[0].range, IndexRange::new(0, 8));
        assert_eq!(chars[1].range, IndexRange::new(8, 9));
    }

    #[test]
    fn test_escaped_backslash_is_not_unicode_escape() {
        assert_eq!(values("\\\\u0041"), "\\\\u0041");
    }

    #[test]
    fn test_python_keeps_escape_text() {
        let chars = decode_characters(&RegexSource::python("\\u0041"));
        assert_eq!(chars.len(), 6);
    }
}
