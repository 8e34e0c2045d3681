use crate::predictors::Predictor;
use crate::solver::linear::LinearBackend;
use crate::solver::SolverBackend;
use crate::{ChromePredictor, Flavor, PredictorConfig, PredictorResult, V8Predictor};

/// The [`PredictorBuilder`] collects the backend and configuration before a
/// predictor is started.
///
/// # Example
///
/// ```
/// use xorshift_predictor::{Flavor, PredictorBuilder, PredictorConfig};
///
/// let observed = [0.514802909453242, 0.8295160444053722, 0.6406296433730201, 0.7644759062385258];
/// let mut predictor = PredictorBuilder::new()
///     .with_config(PredictorConfig::strict())
///     .start(Flavor::V8, &observed)?;
/// assert_eq!(predictor.predict_next(1)?, vec![0.03326790742165775]);
/// # Ok::<(), xorshift_predictor::PredictorError>(())
/// ```
#[derive(Debug, Clone)]
#[must_use = "PredictorBuilder does nothing until a start_* method is called"]
pub struct PredictorBuilder<B = LinearBackend> {
    backend: B,
    config: PredictorConfig,
}

impl PredictorBuilder<LinearBackend> {
    /// Construct a builder with the default backend and configuration.
    pub fn new() -> Self {
        Self {
            backend: LinearBackend,
            config: PredictorConfig::default(),
        }
    }
}

impl Default for PredictorBuilder<LinearBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: SolverBackend> PredictorBuilder<B> {
    /// Replaces the solver backend.
    pub fn with_backend<C: SolverBackend>(self, backend: C) -> PredictorBuilder<C> {
        PredictorBuilder {
            backend,
            config: self.config,
        }
    }

    /// Replaces the configuration. It is validated when a predictor is started.
    pub fn with_config(mut self, config: PredictorConfig) -> Self {
        self.config = config;
        self
    }

    /// Starts a constraint-solving predictor for the V8 flavor.
    pub fn start_v8(self, sequence: &[f64]) -> PredictorResult<V8Predictor<B>> {
        V8Predictor::with_backend(self.backend, self.config, sequence)
    }

    /// Recovers the anchor and starts an analytic predictor for the Chrome flavor.
    pub fn start_chrome(self, sequence: &[f64]) -> PredictorResult<ChromePredictor> {
        self.config.validate()?;
        ChromePredictor::recover_with(&self.backend, &self.config, sequence)
    }

    /// Starts a predictor for a flavor chosen at runtime.
    pub fn start(self, flavor: Flavor, sequence: &[f64]) -> PredictorResult<Box<dyn Predictor>>
    where
        B: 'static,
    {
        let predictor: Box<dyn Predictor> = match flavor {
            Flavor::V8 => Box::new(self.start_v8(sequence)?),
            Flavor::Chrome => Box::new(self.start_chrome(sequence)?),
        };
        Ok(predictor)
    }
}
