//! Conversion between raw 64-bit state words and the doubles the engine exposes.
//!
//! The generator only ever shows callers the high bits of `word0`. Going forward
//! ([`encode_anchor`]) is exact; going backwards ([`extract_significand`]) can only
//! recover the surviving high bits, which is all the constraint builder needs.
//!
//! The two flavors use different rules and must not be unified:
//!
//! | Flavor | Forward | Backward |
//! |--------|---------|----------|
//! | V8 | `bits((w >> 12) \| 0x3FF0…) - 1.0` | low 52 bits of `bits(v + 1.0)` |
//! | Chrome | `(w >> 11) * 2^-53` | `floor(v * 2^53)` |
//!
//! Every step above is exact in IEEE-754 double arithmetic: the significands fit
//! in 53 bits and all scaling is by powers of two.

use crate::{Flavor, PredictorError, PredictorResult};

/// Biased exponent pattern of `1.0`.
const EXPONENT_ONE: u64 = 0x3FF0_0000_0000_0000;

/// The 52 explicit significand bits of an IEEE-754 double.
const SIGNIFICAND_MASK: u64 = (1 << 52) - 1;

/// `2^53` as a double.
const TWO_POW_53: f64 = 9_007_199_254_740_992.0;

/// Turns a raw state word into the double the engine would hand out for it.
///
/// # Examples
///
/// ```
/// use xorshift_predictor::{codec::encode_anchor, Flavor};
///
/// assert_eq!(encode_anchor(1 << 63, Flavor::V8), 0.5);
/// assert_eq!(encode_anchor(1 << 63, Flavor::Chrome), 0.5);
/// assert_eq!(encode_anchor(0, Flavor::V8), 0.0);
/// ```
#[inline]
#[must_use]
pub fn encode_anchor(word0: u64, flavor: Flavor) -> f64 {
    let significand = word0 >> flavor.discard_width();
    match flavor {
        Flavor::V8 => f64::from_bits(significand | EXPONENT_ONE) - 1.0,
        Flavor::Chrome => significand as f64 / TWO_POW_53,
    }
}

/// Recovers the significand field (`word0 >> discard_width`) behind an observed double.
///
/// The caller must have validated `value` with [`validate_observation`]; values
/// outside `[0, 1)` produce meaningless fields.
///
/// # Examples
///
/// ```
/// use xorshift_predictor::{codec::extract_significand, Flavor};
///
/// assert_eq!(extract_significand(0.5, Flavor::V8), 1 << 51);
/// assert_eq!(extract_significand(0.5, Flavor::Chrome), 1 << 52);
/// ```
#[inline]
#[must_use]
pub fn extract_significand(value: f64, flavor: Flavor) -> u64 {
    match flavor {
        Flavor::V8 => (value + 1.0).to_bits() & SIGNIFICAND_MASK,
        Flavor::Chrome => (value * TWO_POW_53).floor() as u64,
    }
}

/// Checks that `value` is something `Math.random()` could have returned.
///
/// `index` is the position in the caller's sequence and is only used for the error.
pub fn validate_observation(index: usize, value: f64) -> PredictorResult<f64> {
    if value.is_finite() && (0.0..1.0).contains(&value) {
        Ok(value)
    } else {
        Err(PredictorError::InvalidObservation { index, value })
    }
}

/// Validates every element of a chronological sequence.
pub fn validate_sequence(sequence: &[f64]) -> PredictorResult<()> {
    for (index, &value) in sequence.iter().enumerate() {
        validate_observation(index, value)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_extremes() {
        assert_eq!(encode_anchor(0, Flavor::V8), 0.0);
        assert_eq!(encode_anchor(0, Flavor::Chrome), 0.0);
        assert_eq!(encode_anchor(u64::MAX, Flavor::V8), 0.999_999_999_999_999_8);
        assert_eq!(encode_anchor(u64::MAX, Flavor::Chrome), 0.999_999_999_999_999_9);
        assert!(encode_anchor(u64::MAX, Flavor::V8) < 1.0);
        assert!(encode_anchor(u64::MAX, Flavor::Chrome) < 1.0);
    }

    #[test]
    fn test_encode_known_anchors() {
        // Anchor recovered from the reference V8 sequence.
        assert_eq!(
            encode_anchor(613_684_574_075_185_196, Flavor::V8),
            0.033_267_907_421_657_75
        );
        // Anchor recovered from the reference Chrome sequence.
        assert_eq!(
            encode_anchor(15_354_745_953_866_745_329, Flavor::Chrome),
            0.832_382_446_057_266_6
        );
    }

    #[test]
    fn test_flavors_disagree_on_low_bit() {
        // Bit 11 survives in Chrome but is discarded by V8.
        let word = 1u64 << 11;
        assert_eq!(encode_anchor(word, Flavor::V8), 0.0);
        assert!(encode_anchor(word, Flavor::Chrome) > 0.0);
    }

    #[test]
    fn test_extract_inverts_encode() {
        let words = [
            0u64,
            1,
            0x1234_5678_9abc_def0,
            0x8000_0000_0000_0000,
            u64::MAX,
            613_684_574_075_185_196,
        ];
        for flavor in [Flavor::V8, Flavor::Chrome] {
            for word in words {
                let value = encode_anchor(word, flavor);
                assert_eq!(
                    extract_significand(value, flavor),
                    word >> flavor.discard_width(),
                    "flavor {flavor}, word {word:#x}"
                );
            }
        }
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(validate_observation(0, 0.0).is_ok());
        assert!(validate_observation(0, 0.999).is_ok());
        for bad in [1.0, -0.1, f64::NAN, f64::INFINITY, 2.5] {
            let err = validate_observation(3, bad).unwrap_err();
            assert!(matches!(
                err,
                PredictorError::InvalidObservation { index: 3, .. }
            ));
        }
    }

    #[test]
    fn test_validate_sequence_reports_first_bad_index() {
        let err = validate_sequence(&[0.1, 0.2, 1.5, -1.0]).unwrap_err();
        assert!(matches!(
            err,
            PredictorError::InvalidObservation { index: 2, .. }
        ));
    }
}
