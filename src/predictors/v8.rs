//! Constraint-solving predictor for the V8 flavor.
//!
//! Every prediction is a from-scratch solve over the current window: recover the
//! anchor behind the window, decode its `word0`, push that value into the window
//! and repeat. No solver state survives between iterations.

use tracing::debug;

use crate::codec::{encode_anchor, validate_sequence};
use crate::predictors::window::PredictionWindow;
use crate::predictors::Predictor;
use crate::recovery::{recover_anchor, ConstraintSet};
use crate::solver::linear::LinearBackend;
use crate::solver::SolverBackend;
use crate::{Flavor, PredictorConfig, PredictorError, PredictorResult};

/// Predicts V8 `Math.random()` output from exactly [`window_len`] observations.
///
/// [`window_len`]: PredictorConfig::window_len
///
/// # Examples
///
/// ```
/// use xorshift_predictor::V8Predictor;
///
/// let observed = [0.514802909453242, 0.8295160444053722, 0.6406296433730201, 0.7644759062385258];
/// let mut predictor = V8Predictor::new(&observed)?;
/// assert_eq!(predictor.predict_next(1)?, vec![0.03326790742165775]);
/// # Ok::<(), xorshift_predictor::PredictorError>(())
/// ```
#[derive(Debug, Clone)]
pub struct V8Predictor<B = LinearBackend> {
    backend: B,
    config: PredictorConfig,
    sequence: Vec<f64>,
    window: PredictionWindow,
}

impl V8Predictor<LinearBackend> {
    /// Creates a predictor with the default backend and configuration.
    pub fn new(sequence: &[f64]) -> PredictorResult<Self> {
        Self::with_backend(LinearBackend, PredictorConfig::default(), sequence)
    }
}

impl<B: SolverBackend> V8Predictor<B> {
    /// Creates a predictor using `backend` for every solve.
    ///
    /// Fails if the configuration is invalid, the sequence length differs from
    /// `config.window_len`, or any value is outside `[0, 1)`.
    pub fn with_backend(
        backend: B,
        config: PredictorConfig,
        sequence: &[f64],
    ) -> PredictorResult<Self> {
        config.validate()?;
        if sequence.len() != config.window_len {
            return Err(PredictorError::InvalidSequenceLength {
                expected: config.window_len,
                actual: sequence.len(),
            });
        }
        validate_sequence(sequence)?;
        Ok(Self {
            backend,
            config,
            sequence: sequence.to_vec(),
            window: PredictionWindow::from_chronological(sequence, config.window_len),
        })
    }

    /// Predicts the next `count` values, earliest first.
    ///
    /// Returns an empty vector for `count == 0` without touching the solver. On
    /// error the window is left as it was before the call.
    pub fn predict_next(&mut self, count: usize) -> PredictorResult<Vec<f64>> {
        if count > self.config.max_predictions {
            return Err(PredictorError::UnsupportedPredictionCount {
                requested: count,
                max: self.config.max_predictions,
            });
        }
        if count == 0 {
            return Ok(Vec::new());
        }

        let mut window = self.window.clone();
        let mut predictions = Vec::with_capacity(count);
        for _ in 0..count {
            let constraints = ConstraintSet::from_newest_first(window.newest_first(), Flavor::V8);
            let anchor = recover_anchor(&self.backend, &constraints, self.config.verify_anchor)?;
            let next = encode_anchor(anchor.word0(), Flavor::V8);
            predictions.push(next);
            window.push_newest(next);
        }
        debug!(count, backend = self.backend.name(), "v8 predictions complete");

        self.window = window;
        Ok(predictions)
    }

    /// The caller's observations, oldest first.
    #[must_use]
    pub fn sequence(&self) -> &[f64] {
        &self.sequence
    }

    /// The current window, newest first.
    #[must_use]
    pub fn window(&self) -> &PredictionWindow {
        &self.window
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    /// The solver backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: SolverBackend> Predictor for V8Predictor<B> {
    fn flavor(&self) -> Flavor {
        Flavor::V8
    }

    fn predict_next(&mut self, count: usize) -> PredictorResult<Vec<f64>> {
        V8Predictor::predict_next(self, count)
    }

    fn sequence(&self) -> &[f64] {
        &self.sequence
    }
}
