//! Regex parsing feature
//!
//! ## Architecture
//! ```text
//! parsing/
//! ├── domain/          # Syntax tree arena, automaton view, flags, dialects
//! └── infrastructure/  # Character layer, recursive-descent parser
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use regex_analysis::features::parsing::{parse_regex, RegexSource};
//!
//! let result = parse_regex(RegexSource::java("(?=a)b"))?;
//! let root = result.root();
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::*;
pub use infrastructure::{parse_regex, parse_regex_with_flags};
