//! Analytic predictor for the Chrome flavor.
//!
//! One solve recovers the anchor state behind the whole observed sequence.
//! After that, every prediction is the current `word0` followed by a
//! closed-form [`step_back`](crate::GeneratorState::step_back), so nothing past
//! construction can fail.

use tracing::{debug, trace};

use crate::codec::{encode_anchor, validate_sequence};
use crate::predictors::Predictor;
use crate::recovery::{recover_anchor, ConstraintSet};
use crate::solver::linear::LinearBackend;
use crate::solver::SolverBackend;
use crate::{Flavor, GeneratorState, PredictorConfig, PredictorError, PredictorResult};

/// Predicts Chrome `Math.random()` output by walking a recovered state backwards.
///
/// # Examples
///
/// ```
/// use xorshift_predictor::ChromePredictor;
///
/// let observed = [
///     0.8372682849227072,
///     0.8716440462966869,
///     0.4409878820146589,
///     0.6952151200845069,
///     0.43415411479113564,
/// ];
/// let mut predictor = ChromePredictor::recover(&observed)?;
/// assert_eq!(predictor.next_value(), 0.8323824460572666);
/// assert_eq!(predictor.next_value(), 0.7312701945327716);
/// # Ok::<(), xorshift_predictor::PredictorError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ChromePredictor {
    sequence: Vec<f64>,
    state: GeneratorState,
}

impl ChromePredictor {
    /// Recovers the anchor with the default backend and configuration.
    pub fn recover(sequence: &[f64]) -> PredictorResult<Self> {
        Self::recover_with(&LinearBackend, &PredictorConfig::default(), sequence)
    }

    /// Recovers the anchor using `backend`. This is the only solver call the
    /// predictor ever makes.
    ///
    /// Accepts any non-empty sequence; `config.window_len` does not apply.
    pub fn recover_with<B: SolverBackend>(
        backend: &B,
        config: &PredictorConfig,
        sequence: &[f64],
    ) -> PredictorResult<Self> {
        if sequence.is_empty() {
            return Err(PredictorError::InvalidSequenceLength {
                expected: 1,
                actual: 0,
            });
        }
        validate_sequence(sequence)?;

        let constraints = ConstraintSet::from_chronological(sequence, Flavor::Chrome);
        let state = recover_anchor(backend, &constraints, config.verify_anchor)?;
        debug!(
            observations = sequence.len(),
            backend = backend.name(),
            "chrome anchor recovered"
        );
        Ok(Self {
            sequence: sequence.to_vec(),
            state,
        })
    }

    /// Resumes from a previously recovered anchor.
    #[must_use]
    pub fn from_state(state: GeneratorState) -> Self {
        Self {
            sequence: Vec::new(),
            state,
        }
    }

    /// Returns the next value and steps the cached state back.
    pub fn next_value(&mut self) -> f64 {
        let output = self.state.word0();
        self.state = self.state.step_back();
        trace!(state = %self.state, "stepped back");
        encode_anchor(output, Flavor::Chrome)
    }

    /// Returns the next `count` values, earliest first.
    pub fn predict_next(&mut self, count: usize) -> Vec<f64> {
        (0..count).map(|_| self.next_value()).collect()
    }

    /// The state whose `word0` produces the next value.
    #[must_use]
    pub fn state(&self) -> GeneratorState {
        self.state
    }

    /// The caller's observations, oldest first. Empty when built with
    /// [`from_state`](Self::from_state).
    #[must_use]
    pub fn sequence(&self) -> &[f64] {
        &self.sequence
    }
}

impl Predictor for ChromePredictor {
    fn flavor(&self) -> Flavor {
        Flavor::Chrome
    }

    fn predict_next(&mut self, count: usize) -> PredictorResult<Vec<f64>> {
        Ok(ChromePredictor::predict_next(self, count))
    }

    fn sequence(&self) -> &[f64] {
        &self.sequence
    }
}
