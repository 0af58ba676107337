//! Parsing infrastructure: character layer and recursive-descent parser

pub mod character_parser;
pub mod parser;

pub use character_parser::{decode_characters, SourceCharacter};
pub use parser::{parse_regex, parse_regex_with_flags, RegexParser};
