//! A backend wrapper that counts and times solver activity.
//!
//! Clones share one [`SolverStats`] record, so a caller can keep a handle while a
//! predictor owns the backend:
//!
//! ```
//! use xorshift_predictor::__internal::InstrumentedBackend;
//! use xorshift_predictor::{LinearBackend, PredictorBuilder};
//!
//! let backend = InstrumentedBackend::new(LinearBackend);
//! let observed = [0.514802909453242, 0.8295160444053722, 0.6406296433730201, 0.7644759062385258];
//! let mut predictor = PredictorBuilder::new()
//!     .with_backend(backend.clone())
//!     .start_v8(&observed)?;
//!
//! assert!(predictor.predict_next(0)?.is_empty());
//! assert_eq!(backend.stats().checks, 0);
//!
//! predictor.predict_next(2)?;
//! assert_eq!(backend.stats().checks, 2);
//! assert_eq!(backend.stats().sessions_opened, backend.stats().sessions_closed);
//! # Ok::<(), xorshift_predictor::PredictorError>(())
//! ```

use parking_lot::Mutex;
use std::sync::Arc;
use web_time::{Duration, Instant};

use crate::solver::{BitVecSolver, SatResult, SolverBackend};
use crate::PredictorResult;

/// Counters collected by an [`InstrumentedBackend`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStats {
    /// Sessions successfully opened.
    pub sessions_opened: u64,
    /// Sessions dropped.
    pub sessions_closed: u64,
    /// Satisfiability checks issued.
    pub checks: u64,
    /// Checks that returned [`SatResult::Sat`].
    pub sat: u64,
    /// Checks that returned [`SatResult::Unsat`].
    pub unsat: u64,
    /// Checks that returned [`SatResult::Unknown`].
    pub unknown: u64,
    /// Satisfiable checks whose model left some declared bits free.
    pub underdetermined: u64,
    /// Equality assertions issued.
    pub assertions: u64,
    /// Wall time spent inside `check`.
    pub solve_time: Duration,
}

/// Wraps another backend and records what its sessions do.
#[derive(Debug, Clone)]
pub struct InstrumentedBackend<B> {
    inner: B,
    stats: Arc<Mutex<SolverStats>>,
}

impl<B> InstrumentedBackend<B> {
    /// Wraps `inner` with fresh counters.
    #[must_use]
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            stats: Arc::new(Mutex::new(SolverStats::default())),
        }
    }

    /// Snapshot of the counters.
    #[must_use]
    pub fn stats(&self) -> SolverStats {
        *self.stats.lock()
    }

    /// Zeroes the counters for every clone.
    pub fn reset(&self) {
        *self.stats.lock() = SolverStats::default();
    }

    /// The wrapped backend.
    #[must_use]
    pub fn inner(&self) -> &B {
        &self.inner
    }
}

impl<B: SolverBackend> SolverBackend for InstrumentedBackend<B> {
    type Session = InstrumentedSession<B::Session>;

    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn open(&self) -> PredictorResult<Self::Session> {
        let inner = self.inner.open()?;
        self.stats.lock().sessions_opened += 1;
        Ok(InstrumentedSession {
            inner,
            stats: Arc::clone(&self.stats),
        })
    }
}

/// Session produced by [`InstrumentedBackend`].
#[derive(Debug)]
pub struct InstrumentedSession<S> {
    inner: S,
    stats: Arc<Mutex<SolverStats>>,
}

impl<S> InstrumentedSession<S> {
    /// The wrapped session.
    #[must_use]
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: BitVecSolver> BitVecSolver for InstrumentedSession<S> {
    type Term = S::Term;

    fn declare(&mut self, name: &str, width: u32) -> PredictorResult<S::Term> {
        self.inner.declare(name, width)
    }

    fn constant(&mut self, value: u64, width: u32) -> S::Term {
        self.inner.constant(value, width)
    }

    fn assert_eq(&mut self, lhs: &S::Term, rhs: &S::Term) {
        self.stats.lock().assertions += 1;
        self.inner.assert_eq(lhs, rhs);
    }

    fn check(&mut self) -> SatResult {
        let started = Instant::now();
        let result = self.inner.check();
        let elapsed = started.elapsed();
        let free_bits = self.inner.free_bits().unwrap_or(0);

        let mut stats = self.stats.lock();
        stats.checks += 1;
        stats.solve_time += elapsed;
        match result {
            SatResult::Sat => {
                stats.sat += 1;
                if free_bits > 0 {
                    stats.underdetermined += 1;
                }
            }
            SatResult::Unsat => stats.unsat += 1,
            SatResult::Unknown => stats.unknown += 1,
        }
        result
    }

    fn value_of(&self, term: &S::Term) -> Option<u64> {
        self.inner.value_of(term)
    }

    fn free_bits(&self) -> Option<usize> {
        self.inner.free_bits()
    }
}

impl<S> Drop for InstrumentedSession<S> {
    fn drop(&mut self) {
        self.stats.lock().sessions_closed += 1;
    }
}
