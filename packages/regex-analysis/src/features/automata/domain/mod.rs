//! Automata domain: symbol sets, limits, errors

pub mod charset;
pub mod error;
pub mod limits;

pub use charset::CharSet;
pub use error::AutomatonError;
pub use limits::AutomatonLimits;
