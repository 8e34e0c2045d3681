//! Common test infrastructure shared across integration tests.
//!
//! Reference sequences captured from real engines, and helpers that produce
//! fresh sequences from a known seed through [`CachedStream`].
//!
//! # Usage
//!
//! ```ignore
//! mod common;
//! use common::{fresh_cache, V8_OBSERVED, V8_EXPECTED};
//! ```

#![allow(dead_code)]

use xorshift_predictor::stream::CachedStream;
use xorshift_predictor::{Flavor, GeneratorState};

/// Four consecutive V8 outputs.
pub const V8_OBSERVED: [f64; 4] = [
    0.514802909453242,
    0.8295160444053722,
    0.6406296433730201,
    0.7644759062385258,
];

/// The five values V8 returned after [`V8_OBSERVED`].
pub const V8_EXPECTED: [f64; 5] = [
    0.03326790742165775,
    0.24744760450326297,
    0.0955102665752785,
    0.8605961778593056,
    0.20990633295027128,
];

/// Anchor behind the first value after [`V8_OBSERVED`].
pub const V8_ANCHOR: GeneratorState = GeneratorState::new(613684574075185196, 14102091392899267794);

/// Five consecutive Chrome outputs.
pub const CHROME_OBSERVED: [f64; 5] = [
    0.8372682849227072,
    0.8716440462966869,
    0.4409878820146589,
    0.6952151200845069,
    0.43415411479113564,
];

/// The five values Chrome returned after [`CHROME_OBSERVED`].
pub const CHROME_EXPECTED: [f64; 5] = [
    0.8323824460572666,
    0.7312701945327716,
    0.9733241307702657,
    0.5716292635937189,
    0.11990254642357445,
];

/// Anchor behind the first value after [`CHROME_OBSERVED`].
pub const CHROME_ANCHOR: GeneratorState =
    GeneratorState::new(15354745953866745329, 8008729844099998666);

/// Outputs that no V8-family generator produces in a row.
pub const ARBITRARY: [f64; 4] = [0.1, 0.2, 0.3, 0.4];

/// The first `len` values of a fresh cache, split into `(observed, following)`.
///
/// `observed` holds the first `observe` values; `following` the rest.
pub fn fresh_cache(
    seed: GeneratorState,
    flavor: Flavor,
    observe: usize,
    len: usize,
) -> (Vec<f64>, Vec<f64>) {
    let mut values: Vec<f64> = CachedStream::new(seed, flavor).take(len).collect();
    let following = values.split_off(observe);
    (values, following)
}
