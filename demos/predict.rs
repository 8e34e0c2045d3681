//! Predicts upcoming `Math.random()` values from observed ones.
//!
//! ```bash
//! cargo run --example predict -- --flavor v8 --count 5 \
//!     0.514802909453242 0.8295160444053722 0.6406296433730201 0.7644759062385258
//! ```
//!
//! With `--seed W0,W1` the observations are generated from a known state instead,
//! and the predictions are checked against what the generator actually does.

use clap::{Parser, ValueEnum};
use tracing::info;
use web_time::Instant;
use xorshift_predictor::prelude::*;
use xorshift_predictor::stream::CachedStream;

#[derive(Clone, Copy, ValueEnum)]
enum FlavorArg {
    V8,
    Chrome,
}

impl From<FlavorArg> for Flavor {
    fn from(arg: FlavorArg) -> Self {
        match arg {
            FlavorArg::V8 => Flavor::V8,
            FlavorArg::Chrome => Flavor::Chrome,
        }
    }
}

#[derive(Parser)]
struct Opt {
    /// Engine flavor that produced the values.
    #[arg(short, long, value_enum, default_value = "v8")]
    flavor: FlavorArg,
    /// Number of values to predict.
    #[arg(short, long, default_value_t = 5)]
    count: usize,
    /// Generate observations from this state, given as `word0,word1`.
    #[arg(short, long, value_delimiter = ',')]
    seed: Option<Vec<u64>>,
    /// Show solver activity.
    #[arg(short, long)]
    verbose: bool,
    /// Observed values, oldest first.
    values: Vec<f64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opt = Opt::parse();

    // configure logging: print predictor logs to standard out
    let level = if opt.verbose {
        tracing::Level::TRACE
    } else {
        tracing::Level::INFO
    };
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(level)
            .finish(),
    )?;

    let flavor = Flavor::from(opt.flavor);
    let (observed, actual) = match opt.seed.as_deref() {
        Some(&[word0, word1]) => {
            let observe = match flavor {
                Flavor::V8 => xorshift_predictor::MIN_SEQUENCE_LENGTH,
                Flavor::Chrome => 5,
            };
            let mut stream = CachedStream::new(GeneratorState::new(word0, word1), flavor);
            let observed: Vec<f64> = stream.by_ref().take(observe).collect();
            let actual: Vec<f64> = stream.take(opt.count).collect();
            (observed, Some(actual))
        }
        Some(_) => return Err("--seed takes exactly two words".into()),
        None => (opt.values, None),
    };
    info!(%flavor, observed = ?observed, "recovering state");

    let start = Instant::now();
    let mut predictor = PredictorBuilder::new().start(flavor, &observed)?;
    let predictions = predictor.predict_next(opt.count)?;
    info!(elapsed = ?start.elapsed(), "done");

    for (i, value) in predictions.iter().enumerate() {
        match actual.as_ref().and_then(|actual| actual.get(i)) {
            Some(expected) if expected == value => println!("{value} (ok)"),
            Some(expected) => println!("{value} (expected {expected})"),
            None => println!("{value}"),
        }
    }
    Ok(())
}
