//! Regex flag sets
//!
//! Bit values follow `java.util.regex.Pattern` so flags handed over by a host
//! analyzer can be used as-is.

use serde::{Deserialize, Serialize};

/// Immutable set of active regex flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FlagSet(u32);

impl FlagSet {
    pub const UNIX_LINES: u32 = 0x01;
    pub const CASE_INSENSITIVE: u32 = 0x02;
    pub const COMMENTS: u32 = 0x04;
    pub const MULTILINE: u32 = 0x08;
    pub const DOTALL: u32 = 0x20;
    pub const UNICODE_CASE: u32 = 0x40;
    pub const UNICODE_CHARACTER_CLASS: u32 = 0x100;

    pub fn new(mask: u32) -> Self {
        Self(mask)
    }

    pub fn empty() -> Self {
        Self(0)
    }

    pub fn mask(&self) -> u32 {
        self.0
    }

    pub fn contains(&self, flag: u32) -> bool {
        self.0 & flag != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn with(&self, flag: u32) -> Self {
        Self(self.0 | flag)
    }

    pub fn without(&self, flag: u32) -> Self {
        Self(self.0 & !flag)
    }

    /// Apply the `on`/`off` sets of an inline flag group such as `(?i-s)`
    pub fn apply(&self, on: FlagSet, off: FlagSet) -> Self {
        Self((self.0 | on.0) & !off.0)
    }

    /// Flag bit for an inline flag letter
    pub fn parse_flag(letter: char) -> Option<u32> {
        match letter {
            'i' => Some(Self::CASE_INSENSITIVE),
            'd' => Some(Self::UNIX_LINES),
            'm' => Some(Self::MULTILINE),
            's' => Some(Self::DOTALL),
            'u' => Some(Self::UNICODE_CASE),
            'x' => Some(Self::COMMENTS),
            'U' => Some(Self::UNICODE_CHARACTER_CLASS),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_on_off() {
        let base = FlagSet::new(FlagSet::DOTALL);
        let on = FlagSet::new(FlagSet::CASE_INSENSITIVE);
        let off = FlagSet::new(FlagSet::DOTALL);
        let result = base.apply(on, off);
        assert!(result.contains(FlagSet::CASE_INSENSITIVE));
        assert!(!result.contains(FlagSet::DOTALL));
        // snapshots are values, the base stays untouched
        assert!(base.contains(FlagSet::DOTALL));
    }

    #[test]
    fn test_parse_flag_letters() {
        assert_eq!(FlagSet::parse_flag('i'), Some(FlagSet::CASE_INSENSITIVE));
        assert_eq!(FlagSet::parse_flag('x'), Some(FlagSet::COMMENTS));
        assert_eq!(FlagSet::parse_flag('q'), None);
    }
}
