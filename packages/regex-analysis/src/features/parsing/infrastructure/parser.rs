//! Recursive-descent regex parser
//!
//! ## Grammar
//! ```text
//! disjunction := sequence ('|' sequence)*
//! sequence    := (primary quantifier?)*
//! primary     := group | class | '.' | '^' | '$' | escape | character
//! quantifier  := ('*' | '+' | '?' | '{' n (',' m?)? '}') ('?' | '+')?
//! class       := '[' '^'? union ('&&' union)* ']'
//! ```
//!
//! Flags are tracked as the parser walks the source: `(?i)` changes them for
//! the rest of the enclosing group, `(?i:..)` only inside its own group. Every
//! node stores the flags active where it starts.

use super::character_parser::{decode_characters, SourceCharacter};
use crate::errors::SyntaxError;
use crate::features::parsing::domain::{
    BackReferenceTarget, BoundaryKind, Condition, EscapedClassKind, FlagSet, GroupKind,
    LookDirection, Modifier, NodeId, NodeKind, Polarity, Quantifier, QuantifierKind,
    RegexFeature, RegexParseResult, RegexSource, RegexTree, SimpleKind,
};
use crate::shared::models::IndexRange;

type ParseResult<T> = Result<T, SyntaxError>;

/// Deepest nesting of groups and character classes accepted; every later
/// pass recurses over the tree, so this also bounds their stack use
pub const MAX_NESTING_DEPTH: usize = 64;

/// Parse `source` with no initial flags
pub fn parse_regex(source: RegexSource) -> ParseResult<RegexParseResult> {
    RegexParser::new(source, FlagSet::empty()).parse()
}

/// Parse `source` with flags passed by the host API, e.g. `Pattern.compile(re, flags)`
pub fn parse_regex_with_flags(source: RegexSource, flags: FlagSet) -> ParseResult<RegexParseResult> {
    RegexParser::new(source, flags).parse()
}

pub struct RegexParser {
    source: RegexSource,
    chars: Vec<SourceCharacter>,
    pos: usize,
    tree: RegexTree,
    flags: FlagSet,
    group_count: u32,
    depth: usize,
}

/// Single class element before range detection
enum ClassAtom {
    Char(u32),
    Node(NodeId),
}

impl RegexParser {
    pub fn new(source: RegexSource, initial_flags: FlagSet) -> Self {
        let chars = decode_characters(&source);
        Self {
            source,
            chars,
            pos: 0,
            tree: RegexTree::new(),
            flags: initial_flags,
            group_count: 0,
            depth: 0,
        }
    }

    pub fn parse(mut self) -> ParseResult<RegexParseResult> {
        let root = self.parse_disjunction()?;
        if let Some(c) = self.current() {
            return Err(SyntaxError::new(c.range, "Unmatched closing parenthesis"));
        }
        tracing::trace!(nodes = self.tree.len(), "parsed regex");
        Ok(RegexParseResult::new(self.source, self.tree, root))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Cursor
    // ═══════════════════════════════════════════════════════════════════════

    fn current(&self) -> Option<SourceCharacter> {
        self.chars.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Character at `pos + n` unless it was decoded from a unicode escape,
    /// which always stands for a literal
    fn meta_at(&self, n: usize) -> Option<char> {
        self.chars
            .get(self.pos + n)
            .filter(|c| !c.is_unicode_escape)
            .map(|c| c.value)
    }

    fn peek_meta(&self) -> Option<char> {
        self.meta_at(0)
    }

    fn at_meta(&self, text: &str) -> bool {
        text.chars().enumerate().all(|(i, c)| self.meta_at(i) == Some(c))
    }

    fn eat_meta(&mut self, expected: char) -> bool {
        if self.peek_meta() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn advance(&mut self) -> Option<SourceCharacter> {
        let c = self.current()?;
        self.pos += 1;
        Some(c)
    }

    fn offset(&self) -> isize {
        self.current()
            .map(|c| c.range.begin)
            .unwrap_or(self.source.text().len() as isize)
    }

    fn range_from(&self, start: isize) -> IndexRange {
        IndexRange::new(start, self.offset())
    }

    fn error(&self, message: impl Into<String>) -> SyntaxError {
        let range = self.current().map(|c| c.range).unwrap_or_else(|| {
            let end = self.source.text().len() as isize;
            IndexRange::new(end, end)
        });
        SyntaxError::new(range, message)
    }

    fn push(&mut self, kind: NodeKind, start: isize, flags: FlagSet) -> NodeId {
        let range = self.range_from(start);
        self.tree.push(kind, range, flags)
    }

    fn supports(&self, feature: RegexFeature) -> bool {
        self.source.supports(feature)
    }

    fn skip_comments(&mut self) {
        if !self.flags.contains(FlagSet::COMMENTS) {
            return;
        }
        loop {
            match self.peek_meta() {
                Some(c) if c.is_whitespace() => self.pos += 1,
                Some('#') => {
                    while let Some(c) = self.advance() {
                        if c.value == '\n' {
                            break;
                        }
                    }
                }
                _ => return,
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Disjunctions, sequences, quantifiers
    // ═══════════════════════════════════════════════════════════════════════

    fn parse_disjunction(&mut self) -> ParseResult<NodeId> {
        let start = self.offset();
        let flags = self.flags;
        let mut alternatives = vec![self.parse_sequence()?];
        while self.eat_meta('|') {
            alternatives.push(self.parse_sequence()?);
        }
        if alternatives.len() == 1 {
            return Ok(alternatives[0]);
        }
        Ok(self.push(NodeKind::Disjunction { alternatives }, start, flags))
    }

    fn parse_sequence(&mut self) -> ParseResult<NodeId> {
        let start = self.offset();
        let flags = self.flags;
        let mut items = Vec::new();
        loop {
            self.skip_comments();
            if self.at_end() || matches!(self.peek_meta(), Some('|') | Some(')')) {
                break;
            }
            if self.at_meta("\\Q") {
                let quoted = self.parse_quoted()?;
                items.extend(quoted);
            } else {
                items.push(self.parse_primary()?);
            }

            self.skip_comments();
            let quantifier_start = self.offset();
            if let Some(quantifier) = self.parse_quantifier()? {
                let Some(element) = items.pop() else {
                    return Err(SyntaxError::new(
                        self.range_from(quantifier_start),
                        "Dangling quantifier with nothing to repeat",
                    ));
                };
                let element_range = self.tree.range(element);
                let element_flags = self.tree.flags(element);
                let repetition = self.tree.push(
                    NodeKind::Repetition { element, quantifier },
                    element_range.merge(quantifier.range),
                    element_flags,
                );
                items.push(repetition);
            }
        }
        // a lone item stands for the sequence unless comments or quote
        // delimiters around it belong to the sequence's text
        if let [item] = items[..] {
            if self.tree.range(item) == self.range_from(start) {
                return Ok(item);
            }
        }
        Ok(self.push(NodeKind::Sequence { items }, start, flags))
    }

    fn parse_quantifier(&mut self) -> ParseResult<Option<Quantifier>> {
        let start = self.offset();
        let kind = match self.peek_meta() {
            Some('*') => {
                self.pos += 1;
                QuantifierKind::Simple(SimpleKind::Star)
            }
            Some('+') => {
                self.pos += 1;
                QuantifierKind::Simple(SimpleKind::Plus)
            }
            Some('?') => {
                self.pos += 1;
                QuantifierKind::Simple(SimpleKind::QuestionMark)
            }
            Some('{') => match self.parse_curly()? {
                Some((min, max, fixed)) => QuantifierKind::Curly { min, max, fixed },
                None => return Ok(None),
            },
            _ => return Ok(None),
        };

        let modifier = if self.eat_meta('?') {
            Modifier::Reluctant
        } else if self.peek_meta() == Some('+') && self.supports(RegexFeature::PossessiveQuantifier) {
            self.pos += 1;
            Modifier::Possessive
        } else {
            Modifier::Greedy
        };

        Ok(Some(Quantifier {
            range: self.range_from(start),
            modifier,
            kind,
        }))
    }

    /// `{n}`, `{n,}` or `{n,m}`; leaves the cursor untouched when the braces
    /// do not form a quantifier
    fn parse_curly(&mut self) -> ParseResult<Option<(u32, Option<u32>, bool)>> {
        let saved = self.pos;
        let start = self.offset();
        self.pos += 1;
        let Some(min) = self.parse_number()? else {
            self.pos = saved;
            return Ok(None);
        };
        let (max, fixed) = if self.eat_meta(',') {
            (self.parse_number()?, false)
        } else {
            (Some(min), true)
        };
        if !self.eat_meta('}') {
            self.pos = saved;
            return Ok(None);
        }
        if let Some(max) = max {
            if max < min {
                return Err(SyntaxError::new(
                    self.range_from(start),
                    "Illegal repetition range: minimum is greater than maximum",
                ));
            }
        }
        Ok(Some((min, max, fixed)))
    }

    fn parse_number(&mut self) -> ParseResult<Option<u32>> {
        let start = self.offset();
        let mut value: Option<u32> = None;
        while let Some(digit) = self.peek_meta().and_then(|c| c.to_digit(10)) {
            self.pos += 1;
            let next = value
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit));
            match next {
                Some(v) => value = Some(v),
                None => {
                    while self.peek_meta().is_some_and(|c| c.is_ascii_digit()) {
                        self.pos += 1;
                    }
                    return Err(SyntaxError::new(self.range_from(start), "Number too large"));
                }
            }
        }
        Ok(value)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Primaries
    // ═══════════════════════════════════════════════════════════════════════

    fn parse_primary(&mut self) -> ParseResult<NodeId> {
        let Some(c) = self.current() else {
            return Err(self.error("Unexpected end of regex"));
        };
        let start = c.range.begin;
        let flags = self.flags;
        if c.is_unicode_escape {
            self.pos += 1;
            return Ok(self.push_character(c.value as u32, true, start));
        }
        match c.value {
            '(' => self.parse_group(),
            '[' => self.parse_character_class(),
            '\\' => self.parse_escape(),
            '.' => {
                self.pos += 1;
                Ok(self.push(NodeKind::Dot, start, flags))
            }
            '^' => {
                self.pos += 1;
                Ok(self.push(NodeKind::Boundary(BoundaryKind::LineStart), start, flags))
            }
            '$' => {
                self.pos += 1;
                Ok(self.push(NodeKind::Boundary(BoundaryKind::LineEnd), start, flags))
            }
            '*' | '+' | '?' => Err(SyntaxError::new(
                c.range,
                format!("Unexpected quantifier '{}'", c.value),
            )),
            '{' => {
                if self.parse_curly()?.is_some() {
                    return Err(SyntaxError::new(
                        self.range_from(start),
                        "Dangling quantifier with nothing to repeat",
                    ));
                }
                self.pos += 1;
                Ok(self.push_character('{' as u32, false, start))
            }
            other => {
                self.pos += 1;
                Ok(self.push_character(other as u32, false, start))
            }
        }
    }

    fn push_character(&mut self, code_point: u32, is_escape: bool, start: isize) -> NodeId {
        let flags = self.flags;
        self.push(NodeKind::Character { code_point, is_escape }, start, flags)
    }

    /// `\Q...\E`: every character in between is a literal
    fn parse_quoted(&mut self) -> ParseResult<Vec<NodeId>> {
        let block_start = self.offset();
        self.pos += 2;
        let mut items = Vec::new();
        while !self.at_end() && !self.at_meta("\\E") {
            let start = self.offset();
            if let Some(c) = self.advance() {
                items.push(self.push_character(c.value as u32, false, start));
            }
        }
        if self.at_meta("\\E") {
            self.pos += 2;
        }
        let block = self.range_from(block_start);
        self.tree.add_quoted_block(block);
        Ok(items)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Groups
    // ═══════════════════════════════════════════════════════════════════════

    fn enter_nested(&mut self) -> ParseResult<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(format!(
                "Groups and character classes nested deeper than {} levels",
                MAX_NESTING_DEPTH
            )));
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_group(&mut self) -> ParseResult<NodeId> {
        self.enter_nested()?;
        let group = self.parse_group_contents();
        self.depth -= 1;
        group
    }

    fn parse_group_contents(&mut self) -> ParseResult<NodeId> {
        let start = self.offset();
        let saved_flags = self.flags;
        self.pos += 1;

        let kind = if self.eat_meta('?') {
            match self.peek_meta() {
                Some(':') => {
                    self.pos += 1;
                    GroupKind::NonCapturing {
                        enabled: FlagSet::empty(),
                        disabled: FlagSet::empty(),
                    }
                }
                Some('=') | Some('!') => {
                    let polarity = self.lookaround_polarity();
                    GroupKind::LookAround {
                        direction: LookDirection::Ahead,
                        polarity,
                    }
                }
                Some('<') if matches!(self.meta_at(1), Some('=') | Some('!')) => {
                    self.pos += 1;
                    let polarity = self.lookaround_polarity();
                    GroupKind::LookAround {
                        direction: LookDirection::Behind,
                        polarity,
                    }
                }
                Some('<') if self.supports(RegexFeature::JavaSyntaxGroupName) => {
                    self.pos += 1;
                    let name = self.parse_group_name('>')?;
                    self.group_count += 1;
                    GroupKind::Capturing {
                        name: Some(name),
                        number: self.group_count,
                    }
                }
                Some('>') if self.supports(RegexFeature::AtomicGroup) => {
                    self.pos += 1;
                    GroupKind::Atomic
                }
                Some('P') if self.supports(RegexFeature::PythonSyntaxGroupName) => {
                    self.pos += 1;
                    if self.eat_meta('=') {
                        let name = self.parse_group_name(')')?;
                        let flags = self.flags;
                        return Ok(self.push(
                            NodeKind::BackReference(BackReferenceTarget::Name(name)),
                            start,
                            flags,
                        ));
                    }
                    if !self.eat_meta('<') {
                        return Err(self.error("Expected '<' or '=' after '(?P'"));
                    }
                    let name = self.parse_group_name('>')?;
                    self.group_count += 1;
                    GroupKind::Capturing {
                        name: Some(name),
                        number: self.group_count,
                    }
                }
                Some('(') if self.supports(RegexFeature::ConditionalSubpattern) => {
                    return self.parse_conditional(start, saved_flags);
                }
                _ => return self.parse_flag_group(start, saved_flags),
            }
        } else {
            self.group_count += 1;
            GroupKind::Capturing {
                name: None,
                number: self.group_count,
            }
        };

        let header = self.range_from(start);
        let element = self.parse_disjunction()?;
        self.close_group(start)?;
        self.flags = saved_flags;
        Ok(self.push(
            NodeKind::Group {
                kind,
                header,
                element: Some(element),
            },
            start,
            saved_flags,
        ))
    }

    fn lookaround_polarity(&mut self) -> Polarity {
        let polarity = if self.peek_meta() == Some('!') {
            Polarity::Negative
        } else {
            Polarity::Positive
        };
        self.pos += 1;
        polarity
    }

    fn close_group(&mut self, start: isize) -> ParseResult<()> {
        if self.eat_meta(')') {
            Ok(())
        } else {
            Err(SyntaxError::new(
                self.range_from(start),
                "Unclosed group: expected ')'",
            ))
        }
    }

    fn parse_group_name(&mut self, terminator: char) -> ParseResult<String> {
        let start = self.offset();
        let mut name = String::new();
        while let Some(c) = self.peek_meta() {
            if c == terminator {
                break;
            }
            if !(c.is_ascii_alphanumeric() || c == '_') {
                return Err(self.error(format!("Invalid character '{}' in group name", c)));
            }
            name.push(c);
            self.pos += 1;
        }
        if !self.eat_meta(terminator) {
            return Err(self.error(format!("Expected '{}' after group name", terminator)));
        }
        if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(SyntaxError::new(self.range_from(start), "Invalid group name"));
        }
        Ok(name)
    }

    /// `(?i)`, `(?i-s)` or `(?i:..)`
    fn parse_flag_group(&mut self, start: isize, saved_flags: FlagSet) -> ParseResult<NodeId> {
        let mut enabled = FlagSet::empty();
        let mut disabled = FlagSet::empty();
        let mut negate = false;
        loop {
            match self.peek_meta() {
                Some('-') if !negate => {
                    negate = true;
                    self.pos += 1;
                }
                Some(')') | Some(':') => break,
                Some(letter) => match FlagSet::parse_flag(letter) {
                    Some(flag) if negate => {
                        disabled = disabled.with(flag);
                        self.pos += 1;
                    }
                    Some(flag) => {
                        enabled = enabled.with(flag);
                        self.pos += 1;
                    }
                    None => return Err(self.error(format!("Unknown flag '{}'", letter))),
                },
                None => return Err(self.error("Unclosed group: expected ')'")),
            }
        }

        let kind = GroupKind::NonCapturing { enabled, disabled };
        let scoped_flags = saved_flags.apply(enabled, disabled);
        if self.eat_meta(')') {
            // applies to the rest of the enclosing group
            self.flags = scoped_flags;
            let header = self.range_from(start);
            return Ok(self.push(
                NodeKind::Group {
                    kind,
                    header,
                    element: None,
                },
                start,
                saved_flags,
            ));
        }

        self.pos += 1;
        let header = self.range_from(start);
        self.flags = scoped_flags;
        let element = self.parse_disjunction()?;
        self.close_group(start)?;
        self.flags = saved_flags;
        Ok(self.push(
            NodeKind::Group {
                kind,
                header,
                element: Some(element),
            },
            start,
            saved_flags,
        ))
    }

    /// `(?(1)yes|no)`, `(?(name)yes)` or `(?(?=a)yes|no)`
    fn parse_conditional(&mut self, start: isize, saved_flags: FlagSet) -> ParseResult<NodeId> {
        let condition = if self.meta_at(1) == Some('?') {
            let look = self.parse_group()?;
            if !self.tree.node(look).is_lookaround() {
                return Err(SyntaxError::new(
                    self.tree.range(look),
                    "Conditional subpattern expects a lookaround condition",
                ));
            }
            Condition::LookAround(look)
        } else {
            self.pos += 1;
            let reference_start = self.offset();
            if let Some(number) = self.parse_number()? {
                if !self.eat_meta(')') {
                    return Err(self.error("Expected ')' after group reference"));
                }
                Condition::GroupNumber(number)
            } else {
                let name = self.parse_group_name(')').map_err(|_| {
                    SyntaxError::new(self.range_from(reference_start), "Invalid group reference")
                })?;
                Condition::GroupName(name)
            }
        };

        let yes = self.parse_sequence()?;
        let no = if self.eat_meta('|') {
            Some(self.parse_sequence()?)
        } else {
            None
        };
        if self.peek_meta() == Some('|') {
            return Err(self.error("Conditional subpattern has more than two alternatives"));
        }
        self.close_group(start)?;
        self.flags = saved_flags;
        Ok(self.push(
            NodeKind::ConditionalSubpattern { condition, yes, no },
            start,
            saved_flags,
        ))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Escapes
    // ═══════════════════════════════════════════════════════════════════════

    fn parse_escape(&mut self) -> ParseResult<NodeId> {
        let start = self.offset();
        let flags = self.flags;
        self.pos += 1;
        let Some(c) = self.advance() else {
            return Err(SyntaxError::new(self.range_from(start), "Trailing backslash"));
        };

        let kind = match c.value {
            '1'..='9' => {
                let mut number = c.value as u32 - '0' as u32;
                while let Some(digit) = self.peek_meta().and_then(|d| d.to_digit(10)) {
                    let candidate = number * 10 + digit;
                    if candidate > self.group_count {
                        break;
                    }
                    number = candidate;
                    self.pos += 1;
                }
                NodeKind::BackReference(BackReferenceTarget::Number(number))
            }
            'k' => {
                if !self.eat_meta('<') {
                    return Err(self.error("Expected '<' after \\k"));
                }
                let name = self.parse_group_name('>')?;
                NodeKind::BackReference(BackReferenceTarget::Name(name))
            }
            'b' => NodeKind::Boundary(BoundaryKind::WordBoundary),
            'B' => NodeKind::Boundary(BoundaryKind::NonWordBoundary),
            'A' => NodeKind::Boundary(BoundaryKind::InputStart),
            'G' => NodeKind::Boundary(BoundaryKind::PreviousMatchEnd),
            'Z' => NodeKind::Boundary(BoundaryKind::InputEndFinalTerminator),
            'z' => NodeKind::Boundary(BoundaryKind::InputEnd),
            'R' | 'X' => NodeKind::MiscEscapeSequence,
            letter => match self.escaped_class(letter)? {
                Some(kind) => kind,
                None => NodeKind::Character {
                    code_point: self.escaped_character_value(c.value, start)?,
                    is_escape: true,
                },
            },
        };
        Ok(self.push(kind, start, flags))
    }

    fn escaped_class(&mut self, letter: char) -> ParseResult<Option<NodeKind>> {
        let negated = letter.is_ascii_uppercase();
        let kind = match letter.to_ascii_lowercase() {
            'd' => EscapedClassKind::Digit,
            'w' => EscapedClassKind::Word,
            's' => EscapedClassKind::Whitespace,
            'h' => EscapedClassKind::HorizontalWhitespace,
            'v' => EscapedClassKind::VerticalWhitespace,
            'p' => EscapedClassKind::Property(self.parse_property_name()?),
            _ => return Ok(None),
        };
        Ok(Some(NodeKind::EscapedCharacterClass { kind, negated }))
    }

    fn parse_property_name(&mut self) -> ParseResult<String> {
        if self.eat_meta('{') {
            let mut name = String::new();
            while let Some(c) = self.advance() {
                if c.value == '}' {
                    return Ok(name);
                }
                name.push(c.value);
            }
            return Err(self.error("Unclosed property name: expected '}'"));
        }
        match self.advance() {
            Some(c) if c.value.is_ascii_alphabetic() => Ok(c.value.to_string()),
            _ => Err(self.error("Expected property name")),
        }
    }

    /// Code point of a character escape; the backslash and `letter` are
    /// already consumed
    fn escaped_character_value(&mut self, letter: char, start: isize) -> ParseResult<u32> {
        let value = match letter {
            't' => 0x09,
            'n' => 0x0A,
            'r' => 0x0D,
            'f' => 0x0C,
            'a' => 0x07,
            'e' => 0x1B,
            '0' => {
                let mut value = 0u32;
                let mut digits = 0;
                while let Some(d) = self.peek_meta().and_then(|c| c.to_digit(8)) {
                    if digits == 3 || (digits == 2 && value > 0o37) {
                        break;
                    }
                    value = value * 8 + d;
                    digits += 1;
                    self.pos += 1;
                }
                if digits == 0 {
                    return Err(SyntaxError::new(
                        self.range_from(start),
                        "Illegal octal escape sequence",
                    ));
                }
                value
            }
            'x' => {
                if self.eat_meta('{') {
                    let value = self.parse_hex(8, start)?;
                    if !self.eat_meta('}') {
                        return Err(SyntaxError::new(
                            self.range_from(start),
                            "Unclosed hexadecimal escape sequence",
                        ));
                    }
                    value
                } else {
                    self.parse_exact_hex(2, start)?
                }
            }
            'u' => self.parse_exact_hex(4, start)?,
            'c' => match self.advance() {
                Some(c) => c.value as u32 ^ 0x40,
                None => {
                    return Err(SyntaxError::new(
                        self.range_from(start),
                        "Illegal control escape sequence",
                    ))
                }
            },
            other if !other.is_alphanumeric() => other as u32,
            other => {
                return Err(SyntaxError::new(
                    self.range_from(start),
                    format!("Illegal/unsupported escape sequence '\\{}'", other),
                ))
            }
        };
        if value > 0x10FFFF {
            return Err(SyntaxError::new(
                self.range_from(start),
                "Hexadecimal codepoint is too big",
            ));
        }
        Ok(value)
    }

    fn parse_hex(&mut self, max_digits: usize, start: isize) -> ParseResult<u32> {
        let mut value = 0u32;
        let mut digits = 0;
        while let Some(d) = self.peek_meta().and_then(|c| c.to_digit(16)) {
            if digits == max_digits {
                break;
            }
            value = value * 16 + d;
            digits += 1;
            self.pos += 1;
        }
        if digits == 0 {
            return Err(SyntaxError::new(
                self.range_from(start),
                "Illegal hexadecimal escape sequence",
            ));
        }
        Ok(value)
    }

    fn parse_exact_hex(&mut self, digits: usize, start: isize) -> ParseResult<u32> {
        let mut value = 0u32;
        for _ in 0..digits {
            match self.peek_meta().and_then(|c| c.to_digit(16)) {
                Some(d) => {
                    value = value * 16 + d;
                    self.pos += 1;
                }
                None => {
                    return Err(SyntaxError::new(
                        self.range_from(start),
                        "Illegal hexadecimal escape sequence",
                    ))
                }
            }
        }
        Ok(value)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Character classes
    // ═══════════════════════════════════════════════════════════════════════

    fn nested_classes(&self) -> bool {
        self.supports(RegexFeature::NestedCharacterClass)
    }

    fn parse_character_class(&mut self) -> ParseResult<NodeId> {
        self.enter_nested()?;
        let class = self.parse_class_contents();
        self.depth -= 1;
        class
    }

    fn parse_class_contents(&mut self) -> ParseResult<NodeId> {
        let start = self.offset();
        let flags = self.flags;
        self.pos += 1;
        let negated = self.eat_meta('^');
        let contents = self.parse_class_intersection(start)?;
        if !self.eat_meta(']') {
            return Err(SyntaxError::new(
                self.range_from(start),
                "Unclosed character class",
            ));
        }
        Ok(self.push(NodeKind::CharacterClass { contents, negated }, start, flags))
    }

    fn parse_class_intersection(&mut self, class_start: isize) -> ParseResult<NodeId> {
        let start = self.offset();
        let flags = self.flags;
        let mut operands = vec![self.parse_class_union(class_start, true)?];
        while self.nested_classes() && self.at_meta("&&") {
            self.pos += 2;
            operands.push(self.parse_class_union(class_start, false)?);
        }
        if operands.len() == 1 {
            return Ok(operands[0]);
        }
        Ok(self.push(NodeKind::CharacterClassIntersection { items: operands }, start, flags))
    }

    fn parse_class_union(&mut self, class_start: isize, at_class_start: bool) -> ParseResult<NodeId> {
        let start = self.offset();
        let flags = self.flags;
        let mut items = Vec::new();
        let mut first = at_class_start;
        loop {
            if self.at_end() {
                return Err(SyntaxError::new(
                    self.range_from(class_start),
                    "Unclosed character class",
                ));
            }
            if self.peek_meta() == Some(']') && !first {
                break;
            }
            if self.nested_classes() && self.at_meta("&&") {
                break;
            }
            first = false;
            if self.at_meta("\\Q") {
                let quoted = self.parse_quoted()?;
                items.extend(quoted);
                continue;
            }
            items.push(self.parse_class_item()?);
        }
        Ok(self.push(NodeKind::CharacterClassUnion { items }, start, flags))
    }

    fn parse_class_item(&mut self) -> ParseResult<NodeId> {
        let start = self.offset();
        let flags = self.flags;
        if self.peek_meta() == Some('[') && self.nested_classes() {
            return self.parse_character_class();
        }

        let lower = match self.parse_class_atom()? {
            ClassAtom::Node(id) => return Ok(id),
            ClassAtom::Char(c) => c,
        };

        let is_range = self.peek_meta() == Some('-')
            && self.chars.get(self.pos + 1).is_some()
            && self.meta_at(1) != Some(']')
            && !(self.nested_classes() && self.meta_at(1) == Some('['));
        if !is_range {
            let is_escape = self.tree_text_is_escape(start);
            return Ok(self.push(
                NodeKind::Character {
                    code_point: lower,
                    is_escape,
                },
                start,
                flags,
            ));
        }

        self.pos += 1;
        let upper = match self.parse_class_atom()? {
            ClassAtom::Char(c) => c,
            ClassAtom::Node(_) => {
                return Err(SyntaxError::new(
                    self.range_from(start),
                    "Illegal character range",
                ))
            }
        };
        if upper < lower {
            return Err(SyntaxError::new(
                self.range_from(start),
                "Illegal character range",
            ));
        }
        Ok(self.push(NodeKind::CharacterRange { lower, upper }, start, flags))
    }

    fn tree_text_is_escape(&self, start: isize) -> bool {
        self.chars
            .iter()
            .find(|c| c.range.begin == start)
            .map(|c| c.is_unicode_escape || c.value == '\\')
            .unwrap_or(false)
    }

    fn parse_class_atom(&mut self) -> ParseResult<ClassAtom> {
        let start = self.offset();
        let flags = self.flags;
        let Some(c) = self.advance() else {
            return Err(self.error("Unclosed character class"));
        };
        if c.is_unicode_escape || c.value != '\\' {
            return Ok(ClassAtom::Char(c.value as u32));
        }
        let Some(letter) = self.advance() else {
            return Err(SyntaxError::new(self.range_from(start), "Trailing backslash"));
        };
        if let Some(kind) = self.escaped_class(letter.value)? {
            return Ok(ClassAtom::Node(self.push(kind, start, flags)));
        }
        if matches!(letter.value, 'R' | 'X') {
            return Ok(ClassAtom::Node(self.push(NodeKind::MiscEscapeSequence, start, flags)));
        }
        Ok(ClassAtom::Char(self.escaped_character_value(letter.value, start)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> RegexParseResult {
        parse_regex(RegexSource::java(text)).unwrap()
    }

    fn error(text: &str) -> SyntaxError {
        parse_regex(RegexSource::java(text)).unwrap_err()
    }

    #[test]
    fn test_single_character_root() {
        let result = parse("a");
        assert_eq!(
            result.kind(result.root()),
            &NodeKind::Character {
                code_point: 'a' as u32,
                is_escape: false
            }
        );
        assert_eq!(result.range(result.root()), IndexRange::new(0, 1));
    }

    #[test]
    fn test_sequence_and_disjunction() {
        let result = parse("ab|c");
        let NodeKind::Disjunction { alternatives } = result.kind(result.root()) else {
            panic!("expected disjunction");
        };
        assert_eq!(alternatives.len(), 2);
        assert_eq!(result.text(alternatives[0]), "ab");
        assert_eq!(result.text(alternatives[1]), "c");
    }

    #[test]
    fn test_repetition_range_covers_quantifier() {
        let result = parse("xa{2,10}?");
        let NodeKind::Sequence { items } = result.kind(result.root()) else {
            panic!("expected sequence");
        };
        assert_eq!(result.text(items[1]), "a{2,10}?");
        let NodeKind::Repetition { quantifier, .. } = result.kind(items[1]) else {
            panic!("expected repetition");
        };
        assert_eq!(quantifier.minimum_repetitions(), 2);
        assert_eq!(quantifier.maximum_repetitions(), Some(10));
        assert_eq!(quantifier.modifier, Modifier::Reluctant);
    }

    #[test]
    fn test_possessive_needs_feature() {
        let java = parse("a++");
        let NodeKind::Repetition { quantifier, .. } = java.kind(java.root()) else {
            panic!("expected repetition");
        };
        assert!(quantifier.is_possessive());
        assert!(parse_regex(RegexSource::python("a++")).is_err());
    }

    #[test]
    fn test_lookaround_groups() {
        let result = parse("(?<!a)(?=b)");
        let NodeKind::Sequence { items } = result.kind(result.root()) else {
            panic!("expected sequence");
        };
        assert_eq!(
            result.node(items[0]).lookaround(),
            Some((LookDirection::Behind, Polarity::Negative))
        );
        assert_eq!(
            result.node(items[1]).lookaround(),
            Some((LookDirection::Ahead, Polarity::Positive))
        );
        let NodeKind::Group { header, .. } = result.kind(items[0]) else {
            panic!("expected group");
        };
        assert_eq!(result.text_of_range(*header), "(?<!");
    }

    #[test]
    fn test_inline_flags_scope() {
        let result = parse("(?:(?i)a)b");
        let NodeKind::Sequence { items } = result.kind(result.root()) else {
            panic!("expected sequence");
        };
        let NodeKind::Group { element: Some(inner), .. } = result.kind(items[0]) else {
            panic!("expected group");
        };
        let NodeKind::Sequence { items: inner_items } = result.kind(*inner) else {
            panic!("expected inner sequence");
        };
        assert!(result.node(inner_items[1]).flags.contains(FlagSet::CASE_INSENSITIVE));
        assert!(!result.node(items[1]).flags.contains(FlagSet::CASE_INSENSITIVE));
    }

    #[test]
    fn test_scoped_flag_group() {
        let result = parse("(?s:.).");
        let NodeKind::Sequence { items } = result.kind(result.root()) else {
            panic!("expected sequence");
        };
        let NodeKind::Group { element: Some(dot), .. } = result.kind(items[0]) else {
            panic!("expected group");
        };
        assert!(result.node(*dot).flags.contains(FlagSet::DOTALL));
        assert!(!result.node(items[1]).flags.contains(FlagSet::DOTALL));
    }

    #[test]
    fn test_character_class_structure() {
        let result = parse("[^a-z&&[^x]]");
        let NodeKind::CharacterClass { contents, negated } = result.kind(result.root()) else {
            panic!("expected class");
        };
        assert!(negated);
        assert!(matches!(
            result.kind(*contents),
            NodeKind::CharacterClassIntersection { .. }
        ));
    }

    #[test]
    fn test_leading_bracket_is_literal() {
        let result = parse("[]a]");
        let NodeKind::CharacterClass { contents, .. } = result.kind(result.root()) else {
            panic!("expected class");
        };
        let NodeKind::CharacterClassUnion { items } = result.kind(*contents) else {
            panic!("expected union");
        };
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_escapes() {
        let result = parse("\\x41\\0101\\t\\.");
        let NodeKind::Sequence { items } = result.kind(result.root()) else {
            panic!("expected sequence");
        };
        let code_points: Vec<u32> = items
            .iter()
            .map(|id| match result.kind(*id) {
                NodeKind::Character { code_point, .. } => *code_point,
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        assert_eq!(code_points, vec![0x41, 0o101, 0x09, '.' as u32]);
        assert_eq!(result.text(items[3]), "\\.");
    }

    #[test]
    fn test_back_references() {
        let result = parse("(a)(b)\\2\\k<n>");
        let NodeKind::Sequence { items } = result.kind(result.root()) else {
            panic!("expected sequence");
        };
        assert_eq!(
            result.kind(items[2]),
            &NodeKind::BackReference(BackReferenceTarget::Number(2))
        );
        assert_eq!(
            result.kind(items[3]),
            &NodeKind::BackReference(BackReferenceTarget::Name("n".to_string()))
        );
    }

    #[test]
    fn test_quoted_sequence() {
        let result = parse("\\Q.*\\E");
        let NodeKind::Sequence { items } = result.kind(result.root()) else {
            panic!("expected sequence");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(result.text(items[0]), ".");
    }

    #[test]
    fn test_python_named_groups_and_conditionals() {
        let result = parse_regex(RegexSource::python("(?P<x>a)(?(1)b|c)(?P=x)")).unwrap();
        let NodeKind::Sequence { items } = result.kind(result.root()) else {
            panic!("expected sequence");
        };
        assert!(matches!(
            result.kind(items[1]),
            NodeKind::ConditionalSubpattern {
                condition: Condition::GroupNumber(1),
                no: Some(_),
                ..
            }
        ));
        assert!(matches!(result.kind(items[2]), NodeKind::BackReference(_)));
    }

    #[test]
    fn test_comments_mode() {
        let result = parse("(?x) a # letter a\n b");
        let NodeKind::Sequence { items } = result.kind(result.root()) else {
            panic!("expected sequence");
        };
        assert_eq!(items.len(), 3);
        assert_eq!(result.text(items[2]), "b");
    }

    #[test]
    fn test_syntax_errors() {
        assert_eq!(error("*a").message, "Unexpected quantifier '*'");
        assert!(error("(ab").message.contains("Unclosed group"));
        assert_eq!(error("ab)").message, "Unmatched closing parenthesis");
        assert!(error("a{3,2}").message.contains("Illegal repetition range"));
        assert_eq!(error("[z-a]").message, "Illegal character range");
        assert_eq!(error("[ab").message, "Unclosed character class");
        assert!(error("\\q").message.contains("Illegal/unsupported escape"));
        assert_eq!(error("(?q)").message, "Unknown flag 'q'");
        assert_eq!(error("{2}").message, "Dangling quantifier with nothing to repeat");
    }

    #[test]
    fn test_number_too_large_covers_all_digits() {
        let err = error("a{99999999999999999999}");
        assert_eq!(err.message, "Number too large");
        assert_eq!(err.range, IndexRange::new(2, 22));
    }

    #[test]
    fn test_lone_quoted_character_keeps_delimiters() {
        let result = parse("\\QP");
        assert_eq!(result.text(result.root()), "\\QP");
        assert!(matches!(result.kind(result.root()), NodeKind::Sequence { items } if items.len() == 1));

        let result = parse("(?!\\Q.\\E)a");
        let NodeKind::Sequence { items } = result.kind(result.root()) else {
            panic!("expected sequence");
        };
        let NodeKind::Group { element: Some(element), .. } = result.kind(items[0]) else {
            panic!("expected group");
        };
        assert_eq!(result.text(*element), "\\Q.\\E");
        assert_eq!(result.tree().quoted_blocks(), &[IndexRange::new(3, 8)]);

        let result = parse("x\\Q.\\E++");
        let NodeKind::Sequence { items } = result.kind(result.root()) else {
            panic!("expected sequence");
        };
        assert_eq!(result.text(items[1]), ".\\E++");
        assert_eq!(result.pattern_text(items[1]), "\\Q.\\E++");
        assert_eq!(result.pattern_text(result.root()), "x\\Q.\\E++");
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let depth = 10_000;
        let pattern = format!("{}a{}", "(?:".repeat(depth), ")".repeat(depth));
        let err = error(&pattern);
        assert!(err.message.contains("nested deeper"));

        let captures = format!("{}a{}", "(".repeat(20_000), ")".repeat(20_000));
        assert!(parse_regex(RegexSource::java(captures)).is_err());

        let classes = format!("{}a{}", "[".repeat(depth), "]".repeat(depth));
        assert!(parse_regex(RegexSource::java(classes)).is_err());
    }

    #[test]
    fn test_nesting_up_to_the_limit_is_accepted() {
        let depth = MAX_NESTING_DEPTH;
        let pattern = format!("{}a{}", "(?:".repeat(depth), ")".repeat(depth));
        assert!(parse_regex(RegexSource::java(pattern)).is_ok());
    }
}
