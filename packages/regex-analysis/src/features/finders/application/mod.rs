//! Finder application layer

pub mod analyze_regex;

pub use analyze_regex::{PatternReport, RegexAnalyzer};
