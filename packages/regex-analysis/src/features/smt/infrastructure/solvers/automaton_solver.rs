//! Built-in solver backend on finite automata
//!
//! Decides the fragment produced by the translator exactly: after
//! normalization and segmentation each conjunct is a set of memberships over
//! windows of one string `v₀·v₁·…·vₙ₋₁`. The string is encoded with boundary
//! markers `#0 v₀ #1 v₁ … vₙ₋₁ #n` over an alphabet extended past the last
//! code point, every window membership becomes an automaton over that
//! alphabet, and the conjunct is satisfiable iff the product is non-empty.
//!
//! ## Usage
//! ```rust,ignore
//! let context = AutomatonSolverContext::new(SolverLimits::default());
//! let mut prover = context.new_prover_environment();
//! prover.add_constraint(formula);
//! let unsat = prover.is_unsat()?;
//! ```

use super::normal_form::{disjunctive_normal_form, Conjunct};
use super::segments::SegmentProblem;
use crate::features::automata::{compile, AutomatonError, AutomatonLimits, Dfa};
use crate::features::smt::domain::{BooleanFormula, RegexFormula, StringVar, MAX_CODE_POINT};
use crate::features::smt::ports::{ProverEnvironment, SolverContext, SolverError, SolverResult};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, trace};

/// First symbol past the code points, used as marker `#0`
const MARKER_BASE: u32 = MAX_CODE_POINT + 1;

/// Bounds on one satisfiability query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverLimits {
    pub timeout_ms: u64,
    pub max_states: usize,
    pub max_branches: usize,
}

impl Default for SolverLimits {
    fn default() -> Self {
        Self {
            timeout_ms: 5_000,
            max_states: 10_000,
            max_branches: 256,
        }
    }
}

impl From<AutomatonError> for SolverError {
    fn from(err: AutomatonError) -> Self {
        match err {
            AutomatonError::Timeout => SolverError::Timeout,
            AutomatonError::StateLimitExceeded { limit } => {
                SolverError::ResourceLimit(format!("automaton state limit of {} exceeded", limit))
            }
            AutomatonError::Unsupported(what) => SolverError::Unsupported(what),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AutomatonSolverContext {
    limits: SolverLimits,
}

impl AutomatonSolverContext {
    pub fn new(limits: SolverLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> SolverLimits {
        self.limits
    }
}

impl SolverContext for AutomatonSolverContext {
    type Prover = AutomatonProver;

    fn name(&self) -> &'static str {
        "automaton"
    }

    fn new_prover_environment(&self) -> AutomatonProver {
        AutomatonProver {
            limits: self.limits,
            constraints: Vec::new(),
        }
    }
}

pub struct AutomatonProver {
    limits: SolverLimits,
    constraints: Vec<BooleanFormula>,
}

impl ProverEnvironment for AutomatonProver {
    fn add_constraint(&mut self, formula: BooleanFormula) {
        self.constraints.push(formula);
    }

    fn is_unsat(&mut self) -> SolverResult<bool> {
        let automaton_limits = AutomatonLimits::new(self.limits.max_states)
            .with_timeout(Duration::from_millis(self.limits.timeout_ms));
        let formula = BooleanFormula::and(self.constraints.clone());
        let conjuncts = disjunctive_normal_form(&formula, self.limits.max_branches)?;
        debug!(conjuncts = conjuncts.len(), "deciding formula");

        let mut first_error = None;
        for (index, conjunct) in conjuncts.into_iter().enumerate() {
            match decide_conjunct(conjunct, &automaton_limits) {
                Ok(true) => {
                    trace!(index, "conjunct satisfiable");
                    return Ok(false);
                }
                Ok(false) => trace!(index, "conjunct unsatisfiable"),
                Err(err) => {
                    trace!(index, error = %err, "conjunct undecided");
                    first_error.get_or_insert(err);
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(true),
        }
    }
}

/// `Ok(true)` when the conjunct has a model
fn decide_conjunct(conjunct: Conjunct, limits: &AutomatonLimits) -> SolverResult<bool> {
    let problem = SegmentProblem::from_conjunct(conjunct)?;

    for language in &problem.nullable {
        let dfa = compile(language, limits)?;
        if !dfa.states[dfa.start].accepting {
            return Ok(false);
        }
    }

    let mut isolated: BTreeMap<StringVar, Vec<RegexFormula>> = BTreeMap::new();
    for (var, language) in &problem.isolated {
        isolated.entry(*var).or_default().push(language.clone());
    }
    for languages in isolated.into_values() {
        if compile(&RegexFormula::intersection(languages), limits)?.is_empty() {
            return Ok(false);
        }
    }

    let segments = problem.backbone.len() as u32;
    let mut product = skeleton(segments);
    for (begin, end, language) in merge_windows(&problem.windows) {
        let inner = compile(&language, limits)?;
        let window = window_automaton(&inner, begin as u32, end as u32, segments);
        product = product.intersect(&window, limits)?;
        if product.is_empty() {
            return Ok(false);
        }
    }
    Ok(!product.is_empty())
}

/// One intersected language per distinct window
fn merge_windows(windows: &[(usize, usize, RegexFormula)]) -> Vec<(usize, usize, RegexFormula)> {
    let mut grouped: Vec<(usize, usize, Vec<RegexFormula>)> = Vec::new();
    for (begin, end, language) in windows {
        match grouped.iter_mut().find(|(b, e, _)| b == begin && e == end) {
            Some((_, _, languages)) => languages.push(language.clone()),
            None => grouped.push((*begin, *end, vec![language.clone()])),
        }
    }
    grouped
        .into_iter()
        .map(|(begin, end, languages)| (begin, end, RegexFormula::intersection(languages)))
        .collect()
}

fn marker(index: u32) -> u32 {
    MARKER_BASE + index
}

/// Words `#0 Σ* #1 Σ* … Σ* #n`
fn skeleton(segments: u32) -> Dfa {
    let mut dfa = Dfa::empty();
    let mut current = dfa.start;
    let first = dfa.add_state(segments == 0);
    dfa.states[current].transitions.push((marker(0), marker(0), first));
    current = first;
    for index in 1..=segments {
        let next = dfa.add_state(index == segments);
        let state = &mut dfa.states[current];
        state.transitions.push((0, MAX_CODE_POINT, current));
        state.transitions.push((marker(index), marker(index), next));
        current = next;
    }
    dfa
}

/// Words whose text between markers `#begin` and `#end`, markers removed,
/// is accepted by `inner`
fn window_automaton(inner: &Dfa, begin: u32, end: u32, segments: u32) -> Dfa {
    let universe_max = marker(segments);
    let offset = 1;
    let mut dfa = Dfa {
        states: Vec::with_capacity(inner.len() + 2),
        start: 0,
    };

    let before = dfa.add_state(false);
    let before_marker = marker(begin);
    dfa.states[before].transitions.push((0, before_marker - 1, before));
    dfa.states[before]
        .transitions
        .push((before_marker, before_marker, inner.start + offset));
    if before_marker < universe_max {
        dfa.states[before]
            .transitions
            .push((before_marker + 1, universe_max, before));
    }

    for _ in &inner.states {
        dfa.add_state(false);
    }
    let after = dfa.add_state(true);
    dfa.states[after].transitions.push((0, universe_max, after));

    for (id, state) in inner.states.iter().enumerate() {
        let mut transitions: Vec<(u32, u32, usize)> = state
            .transitions
            .iter()
            .filter(|(lo, _, _)| *lo <= MAX_CODE_POINT)
            .map(|(lo, hi, to)| (*lo, (*hi).min(MAX_CODE_POINT), to + offset))
            .collect();
        if end > begin + 1 {
            transitions.push((marker(begin + 1), marker(end - 1), id + offset));
        }
        if state.accepting {
            transitions.push((marker(end), marker(end), after));
        }
        dfa.states[id + offset].transitions = transitions;
    }
    dfa
}
