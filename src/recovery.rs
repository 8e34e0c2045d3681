//! Turning observed doubles into a concrete generator state.
//!
//! Both predictors share this procedure:
//!
//! 1. Order the window newest-first. The newest observation came from the state
//!    one step after the unknown anchor, the next-newest from two steps after,
//!    and so on (the engine dispenses its cache last-first).
//! 2. Declare the anchor as two free 64-bit variables and step it symbolically
//!    once per observation, constraining the high bits of each derived `word0`
//!    to the observation's significand.
//! 3. Check, and read the anchor variables (not the derived expressions) back
//!    out of the model.
//!
//! The anchor itself is the state behind the *next* value the engine will
//! return.

use tracing::{debug, error, trace, warn};
use web_time::Instant;

use crate::codec::extract_significand;
use crate::error::ReconstructionOutcome;
use crate::solver::{BitVecSolver, SatResult, SolverBackend};
use crate::transition::{step, Word};
use crate::{Flavor, GeneratorState, PredictorError, PredictorResult};

/// Width of a state word.
const WORD_BITS: u32 = 64;

/// `word0` of the anchor stepped `depth` times must have this significand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Constraint {
    /// Number of steps from the anchor, starting at 1.
    pub depth: usize,
    /// `word0 >> discard_width` observed at that depth.
    pub significand: u64,
}

/// The equalities one solve must satisfy, in increasing depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintSet {
    flavor: Flavor,
    constraints: Vec<Constraint>,
}

impl ConstraintSet {
    /// Builds constraints from observations ordered newest first.
    #[must_use]
    pub fn from_newest_first(newest_first: &[f64], flavor: Flavor) -> Self {
        let constraints = newest_first
            .iter()
            .enumerate()
            .map(|(i, &value)| Constraint {
                depth: i + 1,
                significand: extract_significand(value, flavor),
            })
            .collect();
        Self {
            flavor,
            constraints,
        }
    }

    /// Builds constraints from observations in chronological order.
    #[must_use]
    pub fn from_chronological(sequence: &[f64], flavor: Flavor) -> Self {
        let newest_first: Vec<f64> = sequence.iter().rev().copied().collect();
        Self::from_newest_first(&newest_first, flavor)
    }

    /// The flavor whose extraction rule produced the significands.
    #[must_use]
    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// Number of constraints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// `true` when there are no constraints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Iterates in increasing depth.
    pub fn iter(&self) -> impl Iterator<Item = &Constraint> + '_ {
        self.constraints.iter()
    }

    /// Replays `anchor` concretely and checks every constraint.
    #[must_use]
    pub fn is_satisfied_by(&self, anchor: GeneratorState) -> bool {
        let shift = self.flavor.discard_width();
        let mut state = anchor;
        let mut depth = 0;
        self.constraints.iter().all(|constraint| {
            while depth < constraint.depth {
                state = state.step();
                depth += 1;
            }
            state.word0() >> shift == constraint.significand
        })
    }
}

/// The unknown anchor and the expression reached by stepping it.
#[derive(Debug, Clone)]
pub struct SymbolicState<T> {
    anchor: (T, T),
    current: (T, T),
    depth: usize,
}

impl<T: Word> SymbolicState<T> {
    /// Starts at the anchor variables.
    #[must_use]
    pub fn new(word0: T, word1: T) -> Self {
        Self {
            current: (word0.clone(), word1.clone()),
            anchor: (word0, word1),
            depth: 0,
        }
    }

    /// Applies one symbolic transition.
    pub fn advance(&mut self) {
        self.current = step(&self.current.0, &self.current.1);
        self.depth += 1;
    }

    /// Steps until `depth` transitions have been applied.
    pub fn advance_to(&mut self, depth: usize) {
        while self.depth < depth {
            self.advance();
        }
    }

    /// `word0` after the transitions applied so far.
    #[must_use]
    pub fn word0(&self) -> &T {
        &self.current.0
    }

    /// `word1` after the transitions applied so far.
    #[must_use]
    pub fn word1(&self) -> &T {
        &self.current.1
    }

    /// The original free variables.
    #[must_use]
    pub fn anchor(&self) -> (&T, &T) {
        (&self.anchor.0, &self.anchor.1)
    }

    /// Transitions applied so far.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Solves `constraints` for the anchor state in a fresh session from `backend`.
///
/// With `verify` set, the recovered anchor is replayed concretely before it is
/// returned; a mismatch means the backend's model is wrong and is reported as
/// [`ReconstructionOutcome::Inconsistent`].
pub fn recover_anchor<B: SolverBackend>(
    backend: &B,
    constraints: &ConstraintSet,
    verify: bool,
) -> PredictorResult<GeneratorState> {
    let flavor = constraints.flavor();
    let shift = flavor.discard_width();

    let mut session = backend.open()?;
    let word0 = session.declare("se_state0", WORD_BITS)?;
    let word1 = session.declare("se_state1", WORD_BITS)?;
    let mut symbolic = SymbolicState::new(word0, word1);

    for constraint in constraints.iter() {
        symbolic.advance_to(constraint.depth);
        let observed = session.constant(constraint.significand, WORD_BITS);
        session.assert_eq(&symbolic.word0().lshr(shift), &observed);
        trace!(
            depth = constraint.depth,
            significand = constraint.significand,
            "added constraint"
        );
    }

    let started = Instant::now();
    let outcome = session.check();
    debug!(
        %flavor,
        backend = backend.name(),
        constraints = constraints.len(),
        %outcome,
        elapsed_us = started.elapsed().as_micros() as u64,
        "solver check finished"
    );
    if outcome != SatResult::Sat {
        return Err(PredictorError::ReconstructionError {
            flavor,
            outcome: outcome.into(),
        });
    }

    let (anchor0, anchor1) = symbolic.anchor();
    let (Some(word0), Some(word1)) = (session.value_of(anchor0), session.value_of(anchor1))
    else {
        return Err(PredictorError::ReconstructionError {
            flavor,
            outcome: ReconstructionOutcome::Unknown,
        });
    };
    let anchor = GeneratorState::new(word0, word1);

    if let Some(free_bits) = session.free_bits().filter(|&bits| bits > 0) {
        warn!(
            %flavor,
            constraints = constraints.len(),
            free_bits,
            "observations do not determine the anchor, free bits resolved to zero"
        );
    }

    if verify && !constraints.is_satisfied_by(anchor) {
        error!(%flavor, %anchor, "recovered anchor does not reproduce the observations");
        return Err(PredictorError::ReconstructionError {
            flavor,
            outcome: ReconstructionOutcome::Inconsistent,
        });
    }
    Ok(anchor)
}
