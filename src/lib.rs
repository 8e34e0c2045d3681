//! # XorShift Predictor
//!
//! Recovers the hidden 128-bit state of the XorShift128+ generator that backs
//! `Math.random()` in V8-based JavaScript engines, and predicts the values the
//! generator will hand out next.
//!
//! Two engine flavors are modeled:
//!
//! - [`Flavor::V8`]: outputs built from the top 52 bits of the state word. Every
//!   prediction is an independent constraint solve over a sliding window of the
//!   four most recent values ([`V8Predictor`]).
//! - [`Flavor::Chrome`]: outputs built from the top 53 bits. One solve recovers an
//!   anchor state, after which predictions walk the generator backwards in closed
//!   form ([`ChromePredictor`]).
//!
//! Engines fill a cache of [`CACHE_SIZE`] values by stepping the generator forward
//! and then dispense it last-first, so "the next value" is produced by the
//! *predecessor* of the state behind the most recent observation.
//!
//! The solver is injected through [`SolverBackend`]. The default
//! [`LinearBackend`] exploits the fact that the transition is linear over GF(2) and
//! needs no system library; the Z3 backend is available behind the `z3-backend`
//! feature.
//!
//! ```
//! use xorshift_predictor::V8Predictor;
//!
//! let observed = [0.514802909453242, 0.8295160444053722, 0.6406296433730201, 0.7644759062385258];
//! let mut predictor = V8Predictor::new(&observed)?;
//! let next = predictor.predict_next(2)?;
//! assert_eq!(next, vec![0.03326790742165775, 0.24744760450326297]);
//! # Ok::<(), xorshift_predictor::PredictorError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub use builder::PredictorBuilder;
pub use config::PredictorConfig;
pub use error::{PredictorError, ReconstructionOutcome};
pub use predictors::chrome::ChromePredictor;
pub use predictors::v8::V8Predictor;
pub use predictors::window::PredictionWindow;
pub use predictors::Predictor;
pub use solver::linear::LinearBackend;
pub use solver::{BitVecSolver, SatResult, SolverBackend};
pub use transition::GeneratorState;

#[cfg(feature = "tokio")]
pub mod asynchronous;
#[doc(hidden)]
pub mod builder;
pub mod codec;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod error;
pub mod prelude;
pub mod recovery;
pub mod solver;
pub mod stream;
pub mod test_config;
pub mod transition;
#[doc(hidden)]
pub mod predictors {
    pub mod chrome;
    #[doc(hidden)]
    pub mod v8;
    pub mod window;

    use crate::{Flavor, PredictorResult};

    /// Uniform interface over both prediction flavors.
    ///
    /// Lets callers pick a flavor at runtime via [`PredictorBuilder::start`].
    ///
    /// [`PredictorBuilder::start`]: crate::PredictorBuilder::start
    pub trait Predictor {
        /// The generator flavor this predictor models.
        fn flavor(&self) -> Flavor;

        /// Returns the next `count` values in the order the generator will produce them.
        fn predict_next(&mut self, count: usize) -> PredictorResult<Vec<f64>>;

        /// The caller's original observations, oldest first.
        fn sequence(&self) -> &[f64];
    }
}

/// Internal module exposing implementation details for testing and benchmarking.
///
/// # ⚠️ WARNING: No Stability Guarantees
///
/// **This module is NOT part of the public API.** Everything here may change
/// without notice and is intended only for property tests, benches and the
/// Z3 cross-checks in `tests/`.
#[doc(hidden)]
pub mod __internal {
    pub use crate::recovery::{recover_anchor, Constraint, ConstraintSet, SymbolicState};
    pub use crate::solver::instrumented::{InstrumentedBackend, SolverStats};
    pub use crate::solver::linear::{LinearSession, LinearTerm};
    pub use crate::transition::{step, step_back, Word};
}

// #############
// # CONSTANTS #
// #############

/// Number of observations the constraint-solving flavor needs to pin down the state.
pub const MIN_SEQUENCE_LENGTH: usize = 4;

/// Number of values the engine generates per cache refill.
pub const CACHE_SIZE: usize = 64;

/// Largest number of values the constraint-solving flavor will predict in one call.
///
/// A fresh cache holds [`CACHE_SIZE`] values; after the [`MIN_SEQUENCE_LENGTH`]
/// observed ones, only this many remain before the engine refills and the
/// backward relationship between consecutive outputs no longer holds.
pub const MAX_PREDICT_NEXT: usize = CACHE_SIZE - MIN_SEQUENCE_LENGTH;

/// Result alias used throughout the crate.
pub type PredictorResult<T> = Result<T, PredictorError>;

/// The engine family whose `Math.random()` produced a sequence.
///
/// The flavors differ in how many low bits of the state word they discard and
/// in how a double maps back to those bits. They are not interchangeable: a
/// sequence from one flavor is generally unsatisfiable under the other.
///
/// # Examples
///
/// ```
/// use xorshift_predictor::Flavor;
///
/// assert_eq!(Flavor::V8.discard_width(), 12);
/// assert_eq!(Flavor::Chrome.significand_bits(), 53);
/// assert_eq!(Flavor::Chrome.to_string(), "chrome");
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flavor {
    /// Node.js / V8 `ToDouble`: 52 significand bits, exponent forced to `[1, 2)`.
    V8,
    /// Chrome: 53 significand bits scaled by `2^-53`.
    Chrome,
}

impl Flavor {
    /// Number of low-order state bits the flavor throws away.
    #[inline]
    #[must_use]
    pub const fn discard_width(self) -> u32 {
        match self {
            Self::V8 => 12,
            Self::Chrome => 11,
        }
    }

    /// Number of state bits that survive into the visible double.
    #[inline]
    #[must_use]
    pub const fn significand_bits(self) -> u32 {
        64 - self.discard_width()
    }

    /// Lowercase name for logging.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::V8 => "v8",
            Self::Chrome => "chrome",
        }
    }
}

impl std::fmt::Display for Flavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ###################
// # UNIT TESTS      #
// ###################
