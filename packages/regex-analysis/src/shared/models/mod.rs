//! Shared models

mod index_range;

pub use index_range::IndexRange;
