//! Fixed-capacity window of the most recent values, newest first.

use smallvec::SmallVec;

use crate::MIN_SEQUENCE_LENGTH;

/// The most recently seen values, newest first.
///
/// Predictions are pushed to the front; once the window is full, the oldest
/// value falls off the back.
///
/// # Examples
///
/// ```
/// use xorshift_predictor::PredictionWindow;
///
/// let mut window = PredictionWindow::from_chronological(&[0.1, 0.2, 0.3, 0.4], 4);
/// assert_eq!(window.newest_first(), &[0.4, 0.3, 0.2, 0.1]);
///
/// window.push_newest(0.5);
/// assert_eq!(window.newest_first(), &[0.5, 0.4, 0.3, 0.2]);
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PredictionWindow {
    values: SmallVec<[f64; MIN_SEQUENCE_LENGTH]>,
    capacity: usize,
}

impl PredictionWindow {
    /// Fills the window from a chronological (oldest first) sequence, keeping the
    /// newest `capacity` values.
    #[must_use]
    pub fn from_chronological(sequence: &[f64], capacity: usize) -> Self {
        let values = sequence.iter().rev().take(capacity).copied().collect();
        Self { values, capacity }
    }

    /// Adds a value as the newest and drops the oldest if over capacity.
    pub fn push_newest(&mut self, value: f64) {
        self.values.insert(0, value);
        self.values.truncate(self.capacity);
    }

    /// The values, newest first.
    #[must_use]
    pub fn newest_first(&self) -> &[f64] {
        &self.values
    }

    /// The most recent value.
    #[must_use]
    pub fn newest(&self) -> Option<f64> {
        self.values.first().copied()
    }

    /// Number of values held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` when the window holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Maximum number of values held.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
