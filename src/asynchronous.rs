//! Tokio adapters for the blocking solver.
//!
//! A solve is CPU-bound and never yields, so these helpers move it onto
//! [`tokio::task::spawn_blocking`]. Cancellation is the caller's concern; wrap
//! the returned future in [`tokio::time::timeout`] to bound it:
//!
//! ```no_run
//! use std::time::Duration;
//! use xorshift_predictor::asynchronous::recover_chrome_async;
//! use xorshift_predictor::{LinearBackend, PredictorConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let observed = vec![0.8372682849227072, 0.8716440462966869, 0.4409878820146589];
//!     let predictor = tokio::time::timeout(
//!         Duration::from_secs(5),
//!         recover_chrome_async(LinearBackend, PredictorConfig::default(), observed),
//!     )
//!     .await??;
//!     println!("anchor: {}", predictor.state());
//!     Ok(())
//! }
//! ```
//!
//! A timed-out blocking task keeps running to completion in the background;
//! only its result is discarded.
//!
//! This module requires the `tokio` feature flag.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinError;

use crate::solver::SolverBackend;
use crate::{ChromePredictor, PredictorConfig, PredictorError, PredictorResult, V8Predictor};

fn task_failed(err: JoinError) -> PredictorError {
    let context = if err.is_cancelled() {
        "solver task was cancelled".to_owned()
    } else {
        "solver task panicked".to_owned()
    };
    PredictorError::TaskFailed { context }
}

/// Recovers a Chrome anchor on the blocking pool.
pub async fn recover_chrome_async<B>(
    backend: B,
    config: PredictorConfig,
    sequence: Vec<f64>,
) -> PredictorResult<ChromePredictor>
where
    B: SolverBackend + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        config.validate()?;
        ChromePredictor::recover_with(&backend, &config, &sequence)
    })
    .await
    .map_err(task_failed)?
}

/// Runs [`V8Predictor::predict_next`] on the blocking pool.
///
/// The predictor stays locked for the duration of the call.
pub async fn predict_v8_async<B>(
    predictor: Arc<Mutex<V8Predictor<B>>>,
    count: usize,
) -> PredictorResult<Vec<f64>>
where
    B: SolverBackend + Send + 'static,
{
    tokio::task::spawn_blocking(move || predictor.lock().predict_next(count))
        .await
        .map_err(task_failed)?
}
