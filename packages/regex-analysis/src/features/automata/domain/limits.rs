//! Resource bounds for automaton constructions

use super::error::AutomatonError;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutomatonLimits {
    /// Ceiling on the states of any single automaton
    pub max_states: usize,
    pub deadline: Option<Instant>,
}

impl AutomatonLimits {
    pub fn new(max_states: usize) -> Self {
        Self {
            max_states,
            deadline: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    pub fn check_states(&self, states: usize) -> Result<(), AutomatonError> {
        if states > self.max_states {
            return Err(AutomatonError::StateLimitExceeded {
                limit: self.max_states,
            });
        }
        Ok(())
    }

    pub fn check_deadline(&self) -> Result<(), AutomatonError> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(AutomatonError::Timeout),
            _ => Ok(()),
        }
    }
}

impl Default for AutomatonLimits {
    fn default() -> Self {
        Self::new(10_000)
    }
}
