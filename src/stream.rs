//! A model of how the engine turns generator steps into `Math.random()` values.
//!
//! The engine does not return one value per step. It steps the generator
//! [`CACHE_SIZE`] times, stores each `word0`, and then hands the cache out
//! last-first. When the cache runs dry it refills from wherever the generator
//! stopped. Within one cache, consecutive outputs are therefore related by
//! [`GeneratorState::step_back`], which is what both predictors exploit.
//!
//! # Usage
//!
//! ```rust
//! use xorshift_predictor::stream::CachedStream;
//! use xorshift_predictor::{Flavor, GeneratorState};
//!
//! let mut stream = CachedStream::new(GeneratorState::new(1, 2), Flavor::V8);
//! let observed: Vec<f64> = stream.by_ref().take(4).collect();
//! assert_eq!(stream.remaining_in_cache(), 60);
//! assert!(observed.iter().all(|v| (0.0..1.0).contains(v)));
//! ```

use crate::codec::encode_anchor;
use crate::{Flavor, GeneratorState, CACHE_SIZE};

/// Engine-style output stream over a concrete generator.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedStream {
    state: GeneratorState,
    flavor: Flavor,
    cache: Vec<u64>,
}

impl CachedStream {
    /// Starts a stream whose first refill steps forward from `seed`.
    #[must_use]
    pub fn new(seed: GeneratorState, flavor: Flavor) -> Self {
        Self {
            state: seed,
            flavor,
            cache: Vec::with_capacity(CACHE_SIZE),
        }
    }

    fn refill(&mut self) {
        for _ in 0..CACHE_SIZE {
            self.state = self.state.step();
            self.cache.push(self.state.word0());
        }
    }

    /// Returns the raw word behind the next output.
    pub fn next_word(&mut self) -> u64 {
        if self.cache.is_empty() {
            self.refill();
        }
        // refill always leaves CACHE_SIZE entries
        self.cache.pop().unwrap_or_default()
    }

    /// Returns the next output as the engine would.
    pub fn next_f64(&mut self) -> f64 {
        encode_anchor(self.next_word(), self.flavor)
    }

    /// Values left before the next refill.
    #[must_use]
    pub fn remaining_in_cache(&self) -> usize {
        self.cache.len()
    }

    /// The flavor used to render outputs.
    #[must_use]
    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// The generator state after the most recent refill.
    #[must_use]
    pub fn generator_state(&self) -> GeneratorState {
        self.state
    }
}

impl Iterator for CachedStream {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_is_dispensed_last_first() {
        let seed = GeneratorState::new(0x1234, 0x5678);
        let mut stream = CachedStream::new(seed, Flavor::V8);
        assert_eq!(stream.generator_state(), seed);
        let first = stream.next_word();
        let second = stream.next_word();

        let mut state = seed;
        for _ in 0..CACHE_SIZE {
            state = state.step();
        }
        assert_eq!(first, state.word0());
        assert_eq!(second, state.step_back().word0());
        // dispensing does not move the generator
        assert_eq!(stream.generator_state(), state);
    }

    #[test]
    fn test_refill_after_cache_exhausted() {
        let seed = GeneratorState::new(7, 11);
        let mut stream = CachedStream::new(seed, Flavor::Chrome);
        for _ in 0..CACHE_SIZE {
            let _ = stream.next_word();
        }
        assert_eq!(stream.remaining_in_cache(), 0);

        let first_of_second_cache = stream.next_word();
        let mut state = seed;
        for _ in 0..2 * CACHE_SIZE {
            state = state.step();
        }
        assert_eq!(first_of_second_cache, state.word0());
        assert_eq!(stream.generator_state(), state);
        assert_eq!(stream.remaining_in_cache(), CACHE_SIZE - 1);
    }

    #[test]
    fn test_outputs_use_flavor_codec() {
        let seed = GeneratorState::new(3, 5);
        let mut words = CachedStream::new(seed, Flavor::Chrome);
        let mut values = CachedStream::new(seed, Flavor::Chrome);
        for _ in 0..10 {
            let word = words.next_word();
            assert_eq!(values.next(), Some(encode_anchor(word, Flavor::Chrome)));
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        let seed = GeneratorState::new(42, 43);
        let a: Vec<f64> = CachedStream::new(seed, Flavor::V8).take(100).collect();
        let b: Vec<f64> = CachedStream::new(seed, Flavor::V8).take(100).collect();
        assert_eq!(a, b);
    }
}
