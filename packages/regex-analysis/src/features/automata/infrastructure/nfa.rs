//! Nondeterministic automata with epsilon moves

use crate::features::automata::domain::{AutomatonError, AutomatonLimits};

#[derive(Debug, Clone, Default)]
pub struct NfaState {
    pub epsilon: Vec<usize>,
    /// `(lower, upper, target)` symbol ranges, inclusive
    pub transitions: Vec<(u32, u32, usize)>,
}

/// Thompson-style NFA with a single start and a single accepting state
#[derive(Debug, Clone)]
pub struct Nfa {
    states: Vec<NfaState>,
    max_states: usize,
    pub start: usize,
    pub accept: usize,
}

impl Nfa {
    pub fn new(limits: &AutomatonLimits) -> Self {
        Self {
            states: Vec::new(),
            // epsilon states are cheap compared to subset states
            max_states: limits.max_states.saturating_mul(4),
            start: 0,
            accept: 0,
        }
    }

    pub fn add_state(&mut self) -> Result<usize, AutomatonError> {
        if self.states.len() >= self.max_states {
            return Err(AutomatonError::StateLimitExceeded {
                limit: self.max_states,
            });
        }
        self.states.push(NfaState::default());
        Ok(self.states.len() - 1)
    }

    pub fn add_epsilon(&mut self, from: usize, to: usize) {
        self.states[from].epsilon.push(to);
    }

    pub fn add_transition(&mut self, from: usize, lower: u32, upper: u32, to: usize) {
        if lower <= upper {
            self.states[from].transitions.push((lower, upper, to));
        }
    }

    pub fn state(&self, id: usize) -> &NfaState {
        &self.states[id]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Sorted epsilon closure of `seeds`
    pub fn epsilon_closure(&self, seeds: impl IntoIterator<Item = usize>) -> Vec<usize> {
        let mut seen = vec![false; self.states.len()];
        let mut stack: Vec<usize> = Vec::new();
        for seed in seeds {
            if !seen[seed] {
                seen[seed] = true;
                stack.push(seed);
            }
        }
        let mut closure = Vec::new();
        while let Some(state) = stack.pop() {
            closure.push(state);
            for &next in &self.states[state].epsilon {
                if !seen[next] {
                    seen[next] = true;
                    stack.push(next);
                }
            }
        }
        closure.sort_unstable();
        closure
    }
}
