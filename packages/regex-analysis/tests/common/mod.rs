//! Common test utilities for regex-analysis
//!
//! Parsing shortcuts and the acceptance corpus shared by the integration
//! tests.

#![allow(dead_code)]

use regex_analysis::features::smt::{AutomatonSolverContext, MatchType, SatisfiabilityChecker};
use regex_analysis::{parse_regex, RegexParseResult, RegexSource};

/// Patterns that can match some input under partial matching
pub const SATISFIABLE: &[&str] = &[
    "a",
    "[a-z]",
    "a|b",
    "^a$",
    "a*",
    "a++",
    "abc(d|e)",
    "(?=a)a",
    "(?=a)..",
    "(?=a)(?=.b)ab",
    "(?=a)a(?=b)b",
    "(?=abc)ab(?=cd)cde",
    "(?:a(?=c)|b(?=d))c",
    "a(?=b)",
    "(?!ab)..",
    "(?<=a)b",
    "abc(?<=bc)d(?<=cd)e",
    "b(?<!a)",
    "abc(?<!c.)",
    "x*+y",
    "(xy)++x",
    "([a-y])++z",
    "([0-8])++[1-9]",
    "x++(?<=x)",
    "x++..(?<=x)",
];

/// Patterns that can never match under partial matching
pub const UNSATISFIABLE: &[&str] = &[
    "(?=a)b",
    "(?=ac)ab",
    "(?=a)(?=b).",
    "(?=ab).(?:a(?=c)|b(?=d))c",
    "(?=[ab])(?=[bc])[ac]",
    "(?=a)[^ba]",
    "(?!a)a",
    "(?!a|b)a",
    "(?!.)ab",
    "b(?<=a)",
    "abc(?<=c.)",
    "[12](?<=[23])(?<=[13])",
    "a(?<!a)",
    "abc(?<!b|c)",
    "x++x",
    "(xy)++xyz",
    "[a-z]++z",
    "[0-9]++[13579]",
    ".++.",
    "x++.(?<=x)",
];

pub fn java(pattern: &str) -> RegexParseResult {
    parse_regex(RegexSource::java(pattern))
        .unwrap_or_else(|e| panic!("'{}' should parse: {}", pattern, e))
}

/// Satisfiability with a fresh checker and the built-in backend
pub fn is_satisfiable(pattern: &str, match_type: MatchType) -> bool {
    let mut checker = SatisfiabilityChecker::new(AutomatonSolverContext::default());
    checker.check(&java(pattern), match_type, true)
}
