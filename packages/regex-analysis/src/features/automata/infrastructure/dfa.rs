//! Deterministic automata over symbol ranges
//!
//! Transitions of a state are sorted, disjoint ranges. Missing symbols lead to
//! an implicit dead state, so a DFA is complete only after [`Dfa::complete`].

use super::nfa::Nfa;
use crate::features::automata::domain::{AutomatonError, AutomatonLimits, CharSet};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DfaState {
    pub accepting: bool,
    /// `(lower, upper, target)`, sorted and disjoint
    pub transitions: Vec<(u32, u32, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    pub states: Vec<DfaState>,
    pub start: usize,
}

impl Dfa {
    /// Automaton of the empty language
    pub fn empty() -> Self {
        Self {
            states: vec![DfaState::default()],
            start: 0,
        }
    }

    /// Automaton accepting every word over `0..=max`
    pub fn universal(max: u32) -> Self {
        Self {
            states: vec![DfaState {
                accepting: true,
                transitions: vec![(0, max, 0)],
            }],
            start: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty_automaton(&self) -> bool {
        self.states.is_empty()
    }

    pub fn add_state(&mut self, accepting: bool) -> usize {
        self.states.push(DfaState {
            accepting,
            transitions: Vec::new(),
        });
        self.states.len() - 1
    }

    /// Subset construction
    pub fn from_nfa(nfa: &Nfa, limits: &AutomatonLimits) -> Result<Self, AutomatonError> {
        let mut dfa = Dfa {
            states: Vec::new(),
            start: 0,
        };
        let mut index: FxHashMap<Vec<usize>, usize> = FxHashMap::default();
        let mut queue: VecDeque<Vec<usize>> = VecDeque::new();

        let start_set = nfa.epsilon_closure([nfa.start]);
        index.insert(start_set.clone(), 0);
        dfa.add_state(start_set.contains(&nfa.accept));
        queue.push_back(start_set);

        while let Some(set) = queue.pop_front() {
            limits.check_deadline()?;
            let from = index[&set];

            let moves: Vec<(u32, u32, usize)> = set
                .iter()
                .flat_map(|s| nfa.state(*s).transitions.iter().copied())
                .collect();
            let mut points: Vec<u64> = moves
                .iter()
                .flat_map(|(lo, hi, _)| [*lo as u64, *hi as u64 + 1])
                .collect();
            points.sort_unstable();
            points.dedup();

            let mut transitions: Vec<(u32, u32, usize)> = Vec::new();
            for window in points.windows(2) {
                let (lo, hi) = (window[0] as u32, (window[1] - 1) as u32);
                let targets = moves
                    .iter()
                    .filter(|(l, h, _)| *l <= lo && hi <= *h)
                    .map(|(_, _, t)| *t);
                let target_set = nfa.epsilon_closure(targets);
                if target_set.is_empty() {
                    continue;
                }
                let target = match index.get(&target_set) {
                    Some(id) => *id,
                    None => {
                        let id = dfa.add_state(target_set.contains(&nfa.accept));
                        limits.check_states(dfa.len())?;
                        index.insert(target_set.clone(), id);
                        queue.push_back(target_set);
                        id
                    }
                };
                push_merged(&mut transitions, lo, hi, target);
            }
            dfa.states[from].transitions = transitions;
        }

        Ok(dfa)
    }

    /// Add a sink so that every symbol in `0..=max` has a transition
    pub fn complete(&mut self, max: u32) {
        let mut sink: Option<usize> = None;
        for id in 0..self.states.len() {
            let covered = CharSet::from_ranges(
                self.states[id]
                    .transitions
                    .iter()
                    .map(|(lo, hi, _)| (*lo, *hi))
                    .collect(),
            );
            let gaps = covered.complement(max);
            if gaps.is_empty() {
                continue;
            }
            let sink_id = match sink {
                Some(s) => s,
                None => {
                    let s = self.add_state(false);
                    self.states[s].transitions = vec![(0, max, s)];
                    sink = Some(s);
                    s
                }
            };
            let state = &mut self.states[id];
            state
                .transitions
                .extend(gaps.ranges().iter().map(|(lo, hi)| (*lo, *hi, sink_id)));
            state.transitions.sort_unstable();
        }
    }

    /// Language complement within words over `0..=max`
    pub fn complement(&self, max: u32) -> Dfa {
        let mut dfa = self.clone();
        dfa.complete(max);
        for state in &mut dfa.states {
            state.accepting = !state.accepting;
        }
        dfa
    }

    /// Product automaton, restricted to reachable pairs
    pub fn intersect(&self, other: &Dfa, limits: &AutomatonLimits) -> Result<Dfa, AutomatonError> {
        let mut dfa = Dfa {
            states: Vec::new(),
            start: 0,
        };
        let mut index: FxHashMap<(usize, usize), usize> = FxHashMap::default();
        let mut queue = VecDeque::new();
        let start = (self.start, other.start);
        index.insert(start, 0);
        dfa.add_state(self.states[start.0].accepting && other.states[start.1].accepting);
        queue.push_back(start);

        while let Some((a, b)) = queue.pop_front() {
            limits.check_deadline()?;
            let from = index[&(a, b)];
            let left = &self.states[a].transitions;
            let right = &other.states[b].transitions;
            let mut transitions = Vec::new();
            let (mut i, mut j) = (0, 0);
            while i < left.len() && j < right.len() {
                let (l_lo, l_hi, l_to) = left[i];
                let (r_lo, r_hi, r_to) = right[j];
                let lo = l_lo.max(r_lo);
                let hi = l_hi.min(r_hi);
                if lo <= hi {
                    let pair = (l_to, r_to);
                    let target = match index.get(&pair) {
                        Some(id) => *id,
                        None => {
                            let id = dfa.add_state(
                                self.states[l_to].accepting && other.states[r_to].accepting,
                            );
                            limits.check_states(dfa.len())?;
                            index.insert(pair, id);
                            queue.push_back(pair);
                            id
                        }
                    };
                    push_merged(&mut transitions, lo, hi, target);
                }
                if l_hi < r_hi {
                    i += 1;
                } else {
                    j += 1;
                }
            }
            dfa.states[from].transitions = transitions;
        }

        Ok(dfa)
    }

    /// States from which an accepting state is reachable
    pub fn live_states(&self) -> Vec<bool> {
        let mut reverse: Vec<Vec<usize>> = vec![Vec::new(); self.states.len()];
        for (from, state) in self.states.iter().enumerate() {
            for (_, _, to) in &state.transitions {
                reverse[*to].push(from);
            }
        }
        let mut live = vec![false; self.states.len()];
        let mut stack: Vec<usize> = Vec::new();
        for (id, state) in self.states.iter().enumerate() {
            if state.accepting {
                live[id] = true;
                stack.push(id);
            }
        }
        while let Some(state) = stack.pop() {
            for &pred in &reverse[state] {
                if !live[pred] {
                    live[pred] = true;
                    stack.push(pred);
                }
            }
        }
        live
    }

    fn reachable_states(&self) -> Vec<bool> {
        let mut reachable = vec![false; self.states.len()];
        let mut stack = vec![self.start];
        reachable[self.start] = true;
        while let Some(state) = stack.pop() {
            for (_, _, to) in &self.states[state].transitions {
                if !reachable[*to] {
                    reachable[*to] = true;
                    stack.push(*to);
                }
            }
        }
        reachable
    }

    /// No word is accepted
    pub fn is_empty(&self) -> bool {
        let reachable = self.reachable_states();
        !self
            .states
            .iter()
            .enumerate()
            .any(|(id, s)| reachable[id] && s.accepting)
    }

    /// The empty word is the only accepted word
    pub fn is_empty_string(&self) -> bool {
        if !self.states[self.start].accepting {
            return false;
        }
        let reachable = self.reachable_states();
        let live = self.live_states();
        !self.states.iter().enumerate().any(|(id, s)| {
            reachable[id] && s.transitions.iter().any(|(_, _, to)| live[*to])
        })
    }

    /// Accept every prefix of an accepted word
    pub fn prefix_close(&mut self) {
        let live = self.live_states();
        for (state, is_live) in self.states.iter_mut().zip(live) {
            if is_live {
                state.accepting = true;
            }
        }
    }

    /// Language `L · Σ*` over `0..=max`
    pub fn followed_by_anything(&self, max: u32) -> Dfa {
        let mut dfa = self.clone();
        for (id, state) in dfa.states.iter_mut().enumerate() {
            if state.accepting {
                state.transitions = vec![(0, max, id)];
            }
        }
        dfa
    }

    /// Does the automaton accept `word`
    pub fn accepts(&self, word: &[u32]) -> bool {
        let mut state = self.start;
        for symbol in word {
            let next = self.states[state]
                .transitions
                .iter()
                .find(|(lo, hi, _)| lo <= symbol && symbol <= hi)
                .map(|(_, _, to)| *to);
            match next {
                Some(to) => state = to,
                None => return false,
            }
        }
        self.states[state].accepting
    }
}

fn push_merged(transitions: &mut Vec<(u32, u32, usize)>, lo: u32, hi: u32, target: usize) {
    if let Some(last) = transitions.last_mut() {
        if last.2 == target && last.1.checked_add(1) == Some(lo) {
            last.1 = hi;
            return;
        }
    }
    transitions.push((lo, hi, target));
}
