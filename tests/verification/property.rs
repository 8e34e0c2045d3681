//! Property-based tests for the transition, the codec and both predictors.
//!
//! Sequences come from [`CachedStream`], which renders values the way the engine
//! does, so every property runs against the flavor's own generation path.

use proptest::prelude::*;
use xorshift_predictor::__internal::{recover_anchor, step, step_back, ConstraintSet, Word};
use xorshift_predictor::codec::{encode_anchor, extract_significand};
use xorshift_predictor::prelude::*;
use xorshift_predictor::stream::CachedStream;
use xorshift_predictor::test_config::{miri_case_count, solver_case_count};
use xorshift_predictor::{CACHE_SIZE, MAX_PREDICT_NEXT, MIN_SEQUENCE_LENGTH};

use crate::common::fresh_cache;

/// Observations the Chrome flavor gets in the end-to-end properties.
const CHROME_OBSERVATIONS: usize = 5;

fn flavor() -> impl Strategy<Value = Flavor> {
    prop_oneof![Just(Flavor::V8), Just(Flavor::Chrome)]
}

/// Declares an anchor, pins it to `(word0, word1)`, steps it `steps` times and
/// reads the derived words back from the model.
fn solve_stepped<B: SolverBackend>(
    backend: &B,
    word0: u64,
    word1: u64,
    steps: usize,
) -> (u64, u64) {
    let mut session = backend.open().unwrap();
    let mut s0 = session.declare("s0", 64).unwrap();
    let mut s1 = session.declare("s1", 64).unwrap();
    let c0 = session.constant(word0, 64);
    let c1 = session.constant(word1, 64);
    session.assert_eq(&s0, &c0);
    session.assert_eq(&s1, &c1);
    for _ in 0..steps {
        let (n0, n1) = step(&s0, &s1);
        s0 = n0;
        s1 = n1;
    }
    assert_eq!(session.check(), SatResult::Sat);
    (
        session.value_of(&s0).unwrap(),
        session.value_of(&s1).unwrap(),
    )
}

// =============================================================================
// Transition
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig {
        cases: miri_case_count(),
        ..ProptestConfig::default()
    })]

    /// step_back undoes step, and vice versa.
    #[test]
    fn prop_step_back_inverts_step(word0 in any::<u64>(), word1 in any::<u64>()) {
        let state = GeneratorState::new(word0, word1);
        prop_assert_eq!(state.step().step_back(), state);
        prop_assert_eq!(state.step_back().step(), state);
    }

    /// The generic transition over `u64` agrees with the state wrapper.
    #[test]
    fn prop_generic_step_matches_state(word0 in any::<u64>(), word1 in any::<u64>()) {
        let state = GeneratorState::new(word0, word1);
        prop_assert_eq!(GeneratorState::from(step(&word0, &word1)), state.step());
        prop_assert_eq!(GeneratorState::from(step_back(&word0, &word1)), state.step_back());
    }

    /// `Word` on `u64` is the native operators.
    #[test]
    fn prop_word_ops_match_native(value in any::<u64>(), other in any::<u64>(), shift in 0u32..64) {
        prop_assert_eq!(Word::xor(&value, &other), value ^ other);
        prop_assert_eq!(Word::shl(&value, shift), value << shift);
        prop_assert_eq!(Word::lshr(&value, shift), value >> shift);
    }

    /// Decoding an engine output yields the significand of the word behind it.
    #[test]
    fn prop_codec_round_trip(
        word0 in any::<u64>(),
        word1 in any::<u64>(),
        flavor in flavor(),
        take in 1usize..=CACHE_SIZE,
    ) {
        let seed = GeneratorState::new(word0, word1);
        let mut words = CachedStream::new(seed, flavor);
        let mut values = CachedStream::new(seed, flavor);
        for _ in 0..take {
            let word = words.next_word();
            let value = values.next_f64();
            prop_assert!((0.0..1.0).contains(&value));
            prop_assert_eq!(extract_significand(value, flavor), word >> flavor.discard_width());
            prop_assert_eq!(encode_anchor(word, flavor), value);
        }
    }
}

// =============================================================================
// Symbolic and concrete transitions agree
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig {
        cases: solver_case_count(),
        ..ProptestConfig::default()
    })]

    /// Stepping symbolic terms and evaluating them equals stepping concrete words.
    #[test]
    fn prop_symbolic_step_matches_concrete(
        word0 in any::<u64>(),
        word1 in any::<u64>(),
        steps in 0usize..=CACHE_SIZE,
    ) {
        let mut concrete = GeneratorState::new(word0, word1);
        for _ in 0..steps {
            concrete = concrete.step();
        }
        let derived = solve_stepped(&LinearBackend, word0, word1, steps);
        prop_assert_eq!(GeneratorState::from(derived), concrete);
    }

    /// The recovered anchor replays every observation.
    #[test]
    fn prop_recovered_anchor_satisfies_constraints(
        word0 in any::<u64>(),
        word1 in any::<u64>(),
        flavor in flavor(),
    ) {
        let seed = GeneratorState::new(word0, word1);
        let (observed, _) = fresh_cache(seed, flavor, CHROME_OBSERVATIONS, CHROME_OBSERVATIONS);
        let constraints = ConstraintSet::from_chronological(&observed, flavor);
        let anchor = recover_anchor(&LinearBackend, &constraints, false).unwrap();
        prop_assert!(constraints.is_satisfied_by(anchor));
    }
}

// =============================================================================
// End-to-end prediction within one cache
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig {
        cases: solver_case_count(),
        ..ProptestConfig::default()
    })]

    /// Four V8 observations from a fresh cache predict the rest of it.
    #[test]
    fn prop_v8_predicts_rest_of_cache(
        word0 in any::<u64>(),
        word1 in any::<u64>(),
        count in 1usize..=MAX_PREDICT_NEXT,
    ) {
        let seed = GeneratorState::new(word0, word1);
        let (observed, following) =
            fresh_cache(seed, Flavor::V8, MIN_SEQUENCE_LENGTH, MIN_SEQUENCE_LENGTH + count);
        let mut predictor = V8Predictor::new(&observed).unwrap();
        prop_assert_eq!(predictor.predict_next(count).unwrap(), following);
    }

    /// One Chrome solve predicts the rest of the cache.
    #[test]
    fn prop_chrome_predicts_rest_of_cache(word0 in any::<u64>(), word1 in any::<u64>()) {
        let seed = GeneratorState::new(word0, word1);
        let (observed, following) =
            fresh_cache(seed, Flavor::Chrome, CHROME_OBSERVATIONS, CACHE_SIZE);
        let mut predictor = ChromePredictor::recover(&observed).unwrap();
        prop_assert_eq!(predictor.predict_next(following.len()), following);
    }

    /// A long V8 run leaves the extra Chrome bit pinned to zero, which the
    /// Chrome model cannot satisfy.
    #[test]
    fn prop_chrome_rejects_v8_output(word0 in any::<u64>(), word1 in any::<u64>()) {
        let seed = GeneratorState::new(word0, word1);
        let (observed, _) = fresh_cache(seed, Flavor::V8, 24, 24);
        let err = ChromePredictor::recover(&observed).unwrap_err();
        let is_reconstruction_error = matches!(
            err,
            PredictorError::ReconstructionError { flavor: Flavor::Chrome, .. }
        );
        prop_assert!(is_reconstruction_error);
    }
}
