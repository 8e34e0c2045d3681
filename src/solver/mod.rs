//! The satisfiability capability recovery depends on.
//!
//! Recovery needs exactly five things from a solver:
//!
//! 1. declare fixed-width bit-vector variables ([`BitVecSolver::declare`]);
//! 2. build expressions from xor and logical shifts ([`Word`]) plus constants;
//! 3. accumulate equality assertions ([`BitVecSolver::assert_eq`]);
//! 4. decide satisfiability ([`BitVecSolver::check`]);
//! 5. read back a concrete value for a variable ([`BitVecSolver::value_of`]).
//!
//! A [`SolverBackend`] hands out one [`BitVecSolver`] session per solve. Sessions
//! are plain owned values, so they are released on every exit path, including
//! unsatisfiable results and early returns through `?`.
//!
//! | Backend | Feature | Notes |
//! |---------|---------|-------|
//! | [`LinearBackend`](linear::LinearBackend) | default | GF(2) elimination, never `Unknown` |
//! | `Z3Backend` | `z3-backend` | requires system Z3 |
//! | [`InstrumentedBackend`](instrumented::InstrumentedBackend) | default | counting/timing wrapper |

use crate::transition::Word;
use crate::PredictorResult;

pub mod instrumented;
pub mod linear;
#[cfg(feature = "z3-backend")]
pub mod z3_backend;

#[cfg(feature = "z3-backend")]
pub use z3_backend::Z3Backend;

/// Outcome of a satisfiability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SatResult {
    /// A model exists.
    Sat,
    /// No model exists.
    Unsat,
    /// The solver could not decide.
    Unknown,
}

impl SatResult {
    /// Lowercase name for logging.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sat => "sat",
            Self::Unsat => "unsat",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SatResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One solver session: a set of variables and assertions checked together.
pub trait BitVecSolver {
    /// Expression type. Expressions are built with the [`Word`] operations.
    type Term: Word;

    /// Declares a free variable of `width` bits.
    fn declare(&mut self, name: &str, width: u32) -> PredictorResult<Self::Term>;

    /// Builds a constant of `width` bits.
    fn constant(&mut self, value: u64, width: u32) -> Self::Term;

    /// Asserts that two expressions are equal.
    fn assert_eq(&mut self, lhs: &Self::Term, rhs: &Self::Term);

    /// Checks whether all assertions so far can hold at once.
    fn check(&mut self) -> SatResult;

    /// Value of `term` in the model found by the last [`check`](Self::check).
    ///
    /// Returns `None` when the last check was not [`SatResult::Sat`].
    fn value_of(&self, term: &Self::Term) -> Option<u64>;

    /// Number of declared bits the assertions leave unconstrained.
    ///
    /// `Some(0)` means the model is unique. Backends that cannot tell return
    /// `None`.
    fn free_bits(&self) -> Option<usize> {
        None
    }
}

/// Factory for solver sessions.
pub trait SolverBackend {
    /// The session type this backend produces.
    type Session: BitVecSolver;

    /// Short backend name for logging.
    fn name(&self) -> &'static str;

    /// Opens a fresh session.
    ///
    /// Fails with [`PredictorError::SolverUnavailable`](crate::PredictorError::SolverUnavailable)
    /// when the backend cannot be initialized.
    fn open(&self) -> PredictorResult<Self::Session>;
}

impl<B: SolverBackend + ?Sized> SolverBackend for &B {
    type Session = B::Session;

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn open(&self) -> PredictorResult<Self::Session> {
        (**self).open()
    }
}
