//! The XorShift128+ state transition and its closed-form inverse.
//!
//! Both functions are written once, generically over [`Word`], and interpreted
//! three ways: over plain `u64` (concrete state), over
//! [`LinearTerm`](crate::solver::linear::LinearTerm) (GF(2) equations) and, with the
//! `z3-backend` feature, over Z3 bit-vectors. Recovery is only correct because all
//! of these agree, and the property tests check that they do.
//!
//! ```text
//! s1 = word0; s0 = word1
//! word0' = s0
//! s1 ^= s1 << 23
//! s1 ^= s1 >> 17
//! s1 ^= s0
//! s1 ^= s0 >> 26
//! word1' = s1
//! ```

use serde::{Deserialize, Serialize};

/// A 64-bit value supporting the operations the transition needs.
///
/// Shifts are logical and discard the bits shifted out. `amount` is always below 64.
pub trait Word: Clone {
    /// Bitwise exclusive or.
    #[must_use]
    fn xor(&self, other: &Self) -> Self;

    /// Logical shift left.
    #[must_use]
    fn shl(&self, amount: u32) -> Self;

    /// Logical (zero-filling) shift right.
    #[must_use]
    fn lshr(&self, amount: u32) -> Self;
}

impl Word for u64 {
    #[inline]
    fn xor(&self, other: &Self) -> Self {
        self ^ other
    }

    #[inline]
    fn shl(&self, amount: u32) -> Self {
        self << amount
    }

    #[inline]
    fn lshr(&self, amount: u32) -> Self {
        self >> amount
    }
}

/// Advances `(word0, word1)` by one generator step.
#[must_use]
pub fn step<W: Word>(word0: &W, word1: &W) -> (W, W) {
    let s0 = word1;
    let mut s1 = word0.xor(&word0.shl(23));
    s1 = s1.xor(&s1.lshr(17));
    s1 = s1.xor(s0);
    s1 = s1.xor(&s0.lshr(26));
    (s0.clone(), s1)
}

/// Computes the unique predecessor of `(word0, word1)`.
///
/// The `>> 17` and `<< 23` mixes are undone by xoring in every further multiple of
/// the shift that still fits in 64 bits.
#[must_use]
pub fn step_back<W: Word>(word0: &W, word1: &W) -> (W, W) {
    let ps1 = word0.clone();
    let mut ps0 = word1.xor(&ps1.lshr(26));
    ps0 = ps0.xor(&ps1);
    ps0 = ps0.xor(&ps0.lshr(17)).xor(&ps0.lshr(34)).xor(&ps0.lshr(51));
    ps0 = ps0.xor(&ps0.shl(23)).xor(&ps0.shl(46));
    (ps0, ps1)
}

/// The complete 128-bit state of the generator at one point in its sequence.
///
/// Both words are opaque unsigned integers; the only way to turn one into a
/// double is [`encode_anchor`](crate::codec::encode_anchor).
///
/// # Examples
///
/// ```
/// use xorshift_predictor::GeneratorState;
///
/// let state = GeneratorState::new(11489856334623440466, 7665746933450455135);
/// let next = state.step();
/// assert_eq!(next, GeneratorState::new(7665746933450455135, 5757515306888244331));
/// assert_eq!(next.step_back(), state);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneratorState {
    word0: u64,
    word1: u64,
}

impl GeneratorState {
    /// Creates a state from its two words.
    #[inline]
    #[must_use]
    pub const fn new(word0: u64, word1: u64) -> Self {
        Self { word0, word1 }
    }

    /// The word the engine turns into output.
    #[inline]
    #[must_use]
    pub const fn word0(self) -> u64 {
        self.word0
    }

    /// The second state word.
    #[inline]
    #[must_use]
    pub const fn word1(self) -> u64 {
        self.word1
    }

    /// Returns the state one generator step ahead.
    #[inline]
    #[must_use]
    pub fn step(self) -> Self {
        let (word0, word1) = step(&self.word0, &self.word1);
        Self { word0, word1 }
    }

    /// Returns the state one generator step behind.
    #[inline]
    #[must_use]
    pub fn step_back(self) -> Self {
        let (word0, word1) = step_back(&self.word0, &self.word1);
        Self { word0, word1 }
    }

    /// Serializes the state to JSON.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes a state previously produced by [`GeneratorState::to_json`].
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<(u64, u64)> for GeneratorState {
    fn from((word0, word1): (u64, u64)) -> Self {
        Self::new(word0, word1)
    }
}

impl From<GeneratorState> for (u64, u64) {
    fn from(state: GeneratorState) -> Self {
        (state.word0, state.word1)
    }
}

impl std::fmt::Display for GeneratorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:#018x}, {:#018x})", self.word0, self.word1)
    }
}
