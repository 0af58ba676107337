//! Finder domain: issues and their locations

pub mod issue;

pub use issue::{RegexIssue, RegexIssueLocation};
