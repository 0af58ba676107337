//! Finder ports

pub mod issue_reporter;

pub use issue_reporter::RegexIssueReporter;
