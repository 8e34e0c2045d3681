use std::error::Error;
use std::fmt;
use std::fmt::Display;

use crate::solver::SatResult;
use crate::Flavor;

/// This enum contains all error messages this library can return. Most API functions will generally return a [`PredictorResult<T>`].
///
/// [`PredictorResult<T>`]: crate::PredictorResult
#[derive(Debug, Clone, PartialEq)]
pub enum PredictorError {
    /// The observed sequence has the wrong number of elements for the selected flavor.
    InvalidSequenceLength {
        /// The number of observations the flavor requires (or the minimum, for the analytic flavor).
        expected: usize,
        /// The number of observations supplied.
        actual: usize,
    },
    /// An observation is not a finite double in `[0, 1)` and cannot have come from the generator.
    InvalidObservation {
        /// Position of the offending value in the caller's (chronological) sequence.
        index: usize,
        /// The offending value.
        value: f64,
    },
    /// The requested number of predictions exceeds what the flavor can produce reliably.
    UnsupportedPredictionCount {
        /// The number of predictions requested.
        requested: usize,
        /// The largest supported request.
        max: usize,
    },
    /// The solver found no state consistent with the observations. The sequence was not produced
    /// by the selected generator flavor. Retrying with the same input is pointless.
    ReconstructionError {
        /// The flavor whose model was rejected.
        flavor: Flavor,
        /// What the solver reported.
        outcome: ReconstructionOutcome,
    },
    /// The solver backend could not be initialized.
    SolverUnavailable {
        /// A description of the failure.
        context: String,
    },
    /// A [`PredictorConfig`] failed validation.
    ///
    /// [`PredictorConfig`]: crate::PredictorConfig
    InvalidConfig {
        /// Further specifies why the configuration was rejected.
        info: String,
    },
    /// A background solver task panicked or was cancelled.
    TaskFailed {
        /// A description of the failure.
        context: String,
    },
}

/// Why a reconstruction attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReconstructionOutcome {
    /// The constraint set is unsatisfiable.
    Unsat,
    /// The solver gave up without deciding.
    Unknown,
    /// The solver reported a model, but replaying it did not reproduce the observations.
    Inconsistent,
}

impl From<SatResult> for ReconstructionOutcome {
    fn from(result: SatResult) -> Self {
        match result {
            SatResult::Unsat => Self::Unsat,
            SatResult::Unknown => Self::Unknown,
            SatResult::Sat => Self::Inconsistent,
        }
    }
}

impl Display for ReconstructionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsat => f.write_str("unsat"),
            Self::Unknown => f.write_str("unknown"),
            Self::Inconsistent => f.write_str("model does not replay"),
        }
    }
}

impl Display for PredictorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictorError::InvalidSequenceLength { expected, actual } => {
                write!(
                    f,
                    "Invalid sequence length: expected {} numbers, got {}",
                    expected, actual
                )
            }
            PredictorError::InvalidObservation { index, value } => {
                write!(
                    f,
                    "Invalid observation at index {}: {} is not a double in [0, 1)",
                    index, value
                )
            }
            PredictorError::UnsupportedPredictionCount { requested, max } => {
                write!(
                    f,
                    "Cannot predict {} numbers: the maximum is {}",
                    requested, max
                )
            }
            PredictorError::ReconstructionError { flavor, outcome } => {
                write!(
                    f,
                    "Unable to reconstruct {} generator state ({})",
                    flavor, outcome
                )
            }
            PredictorError::SolverUnavailable { context } => {
                write!(f, "Solver unavailable: {}", context)
            }
            PredictorError::InvalidConfig { info } => {
                write!(f, "Invalid configuration: {}", info)
            }
            PredictorError::TaskFailed { context } => {
                write!(f, "Solver task failed: {}", context)
            }
        }
    }
}

impl Error for PredictorError {}
