//! Convenient re-exports for common usage.
//!
//! ```rust
//! use xorshift_predictor::prelude::*;
//!
//! let observed = [0.514802909453242, 0.8295160444053722, 0.6406296433730201, 0.7644759062385258];
//! let mut predictor = PredictorBuilder::new().start(Flavor::V8, &observed)?;
//! let next = predictor.predict_next(3)?;
//! assert_eq!(next.len(), 3);
//! # Ok::<(), PredictorError>(())
//! ```

// Predictors
pub use crate::predictors::Predictor;
pub use crate::{ChromePredictor, PredictorBuilder, V8Predictor};

// Fundamental types
pub use crate::{Flavor, GeneratorState};

// Configuration
pub use crate::PredictorConfig;

// Error handling
pub use crate::{PredictorError, PredictorResult};

// Solver capability
pub use crate::{BitVecSolver, LinearBackend, SatResult, SolverBackend};
