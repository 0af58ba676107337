//! Shared module - Common types and utilities
//!
//! Types used by every feature slice. No dependency on parsing or solving.

pub mod models;

pub use models::*;
