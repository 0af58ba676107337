//! Regex issue finders
//!
//! Heuristic finders work on automata built from reconstructed fragments of
//! the pattern; the unsatisfiable-regex finder runs the exact checker.
//!
//! ## Architecture
//! ```text
//! finders/
//! ├── domain/          # RegexIssue, RegexIssueLocation
//! ├── ports/           # RegexIssueReporter
//! ├── infrastructure/  # Reconstruction, intersection, the finders
//! └── application/     # RegexAnalyzer (single and batch)
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use regex_analysis::features::finders::RegexAnalyzer;
//!
//! let analyzer = RegexAnalyzer::default();
//! for issue in analyzer.analyze("(?=a)b")? {
//!     println!("{}: {}", issue.range, issue.message);
//! }
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{PatternReport, RegexAnalyzer};
pub use domain::{RegexIssue, RegexIssueLocation};
pub use infrastructure::{
    FailingLookaheadFinder, PatternIntersection, PossessiveContinuationFinder, ReconstructionVisitor,
    UnsatisfiableRegexFinder,
};
pub use ports::RegexIssueReporter;
