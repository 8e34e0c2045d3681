//! Pure-Rust solver backend based on Gaussian elimination over GF(2).
//!
//! Xor and logical shifts are linear over GF(2), so every bit of every
//! expression the transition can build is an affine function of the unknown
//! variable bits. A [`LinearTerm`] stores one such function per bit as a `u128`
//! coefficient mask plus a constant bit, which caps a session at 128 unknown
//! bits: exactly the two 64-bit words of a generator state.
//!
//! Each asserted equality contributes one row per bit. Rows are reduced into
//! echelon form as they arrive, so [`check`](BitVecSolver::check) only has to
//! back-substitute. The backend never answers [`SatResult::Unknown`]; when the
//! system is under-determined, free unknowns are set to zero.

use tracing::trace;

use crate::solver::{BitVecSolver, SatResult, SolverBackend};
use crate::transition::Word;
use crate::{PredictorError, PredictorResult};

/// Number of unknown bits a session can track.
pub const MAX_UNKNOWN_BITS: u32 = 128;

/// Widest term the backend supports.
pub const MAX_WIDTH: u32 = 64;

/// One affine GF(2) function: `parity(mask & x) ^ constant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
struct Row {
    mask: u128,
    constant: bool,
}

impl Row {
    #[inline]
    fn xor(self, other: Self) -> Self {
        Self {
            mask: self.mask ^ other.mask,
            constant: self.constant ^ other.constant,
        }
    }

    #[inline]
    fn eval(self, assignment: u128) -> bool {
        ((self.mask & assignment).count_ones() & 1 == 1) ^ self.constant
    }
}

/// A bit-vector expression over the session's unknowns, one row per bit (LSB first).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinearTerm {
    rows: Vec<Row>,
}

impl LinearTerm {
    fn constant(value: u64, width: u32) -> Self {
        let rows = (0..width)
            .map(|bit| Row {
                mask: 0,
                constant: (value >> bit) & 1 == 1,
            })
            .collect();
        Self { rows }
    }

    fn variable(offset: u32, width: u32) -> Self {
        let rows = (0..width)
            .map(|bit| Row {
                mask: 1u128 << (offset + bit),
                constant: false,
            })
            .collect();
        Self { rows }
    }

    /// Width in bits.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.rows.len() as u32
    }

    /// `true` when no bit depends on an unknown.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.rows.iter().all(|row| row.mask == 0)
    }

    /// Evaluates the term with unknown bit `i` set to bit `i` of `assignment`.
    #[must_use]
    pub fn evaluate(&self, assignment: u128) -> u64 {
        self.rows
            .iter()
            .enumerate()
            .fold(0u64, |acc, (bit, row)| {
                acc | (u64::from(row.eval(assignment)) << bit)
            })
    }
}

impl Word for LinearTerm {
    fn xor(&self, other: &Self) -> Self {
        debug_assert_eq!(self.width(), other.width(), "xor of mismatched widths");
        let rows = self
            .rows
            .iter()
            .zip(&other.rows)
            .map(|(a, b)| a.xor(*b))
            .collect();
        Self { rows }
    }

    fn shl(&self, amount: u32) -> Self {
        let amount = amount as usize;
        let rows = (0..self.rows.len())
            .map(|bit| {
                if bit >= amount {
                    self.rows[bit - amount]
                } else {
                    Row::default()
                }
            })
            .collect();
        Self { rows }
    }

    fn lshr(&self, amount: u32) -> Self {
        let amount = amount as usize;
        let rows = (0..self.rows.len())
            .map(|bit| self.rows.get(bit + amount).copied().unwrap_or_default())
            .collect();
        Self { rows }
    }
}

/// Row-echelon form keyed by each row's lowest set column.
#[derive(Debug, Clone)]
struct Echelon {
    pivots: Vec<Option<Row>>,
    rank: usize,
    inconsistent: bool,
}

impl Echelon {
    fn new() -> Self {
        Self {
            pivots: vec![None; MAX_UNKNOWN_BITS as usize],
            rank: 0,
            inconsistent: false,
        }
    }

    fn insert(&mut self, mut row: Row) {
        while row.mask != 0 {
            let column = row.mask.trailing_zeros() as usize;
            match self.pivots[column] {
                Some(pivot) => row = row.xor(pivot),
                None => {
                    self.pivots[column] = Some(row);
                    self.rank += 1;
                    return;
                }
            }
        }
        // 0 = 1
        if row.constant {
            self.inconsistent = true;
        }
    }

    /// Back-substitutes from the highest column down. Each pivot row only has
    /// bits at or above its own column, so those are already assigned.
    fn solve(&self) -> Option<u128> {
        if self.inconsistent {
            return None;
        }
        let mut assignment = 0u128;
        for column in (0..self.pivots.len()).rev() {
            if let Some(row) = self.pivots[column] {
                let rest = Row {
                    mask: row.mask & !(1u128 << column),
                    constant: row.constant,
                };
                if rest.eval(assignment) {
                    assignment |= 1u128 << column;
                }
            }
        }
        Some(assignment)
    }
}

/// A GF(2) solver session.
#[derive(Debug, Clone)]
pub struct LinearSession {
    next_unknown: u32,
    echelon: Echelon,
    equations: usize,
    model: Option<u128>,
}

impl LinearSession {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_unknown: 0,
            echelon: Echelon::new(),
            equations: 0,
            model: None,
        }
    }

    /// Number of linearly independent equations asserted so far.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.echelon.rank
    }

    /// Number of bit equations asserted so far.
    #[must_use]
    pub fn equations(&self) -> usize {
        self.equations
    }

    /// Number of unknown bits declared so far.
    #[must_use]
    pub fn unknowns(&self) -> u32 {
        self.next_unknown
    }
}

impl Default for LinearSession {
    fn default() -> Self {
        Self::new()
    }
}

impl BitVecSolver for LinearSession {
    type Term = LinearTerm;

    fn declare(&mut self, name: &str, width: u32) -> PredictorResult<LinearTerm> {
        if width > MAX_WIDTH {
            return Err(PredictorError::SolverUnavailable {
                context: format!(
                    "linear backend supports terms up to {} bits, `{}` needs {}",
                    MAX_WIDTH, name, width
                ),
            });
        }
        if self.next_unknown + width > MAX_UNKNOWN_BITS {
            return Err(PredictorError::SolverUnavailable {
                context: format!(
                    "linear backend tracks at most {} unknown bits, cannot declare `{}`",
                    MAX_UNKNOWN_BITS, name
                ),
            });
        }
        trace!(variable = name, offset = self.next_unknown, width, "declared unknown");
        let term = LinearTerm::variable(self.next_unknown, width);
        self.next_unknown += width;
        Ok(term)
    }

    fn constant(&mut self, value: u64, width: u32) -> LinearTerm {
        LinearTerm::constant(value, width.min(MAX_WIDTH))
    }

    fn assert_eq(&mut self, lhs: &LinearTerm, rhs: &LinearTerm) {
        debug_assert_eq!(lhs.width(), rhs.width(), "equality of mismatched widths");
        for (a, b) in lhs.rows.iter().zip(&rhs.rows) {
            self.echelon.insert(a.xor(*b));
            self.equations += 1;
        }
        self.model = None;
    }

    fn check(&mut self) -> SatResult {
        self.model = self.echelon.solve();
        match self.model {
            Some(_) => SatResult::Sat,
            None => SatResult::Unsat,
        }
    }

    fn value_of(&self, term: &LinearTerm) -> Option<u64> {
        self.model.map(|assignment| term.evaluate(assignment))
    }

    fn free_bits(&self) -> Option<usize> {
        Some((self.next_unknown as usize).saturating_sub(self.echelon.rank))
    }
}

/// Backend producing [`LinearSession`]s. Cannot fail to open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinearBackend;

impl SolverBackend for LinearBackend {
    type Session = LinearSession;

    fn name(&self) -> &'static str {
        "linear"
    }

    fn open(&self) -> PredictorResult<LinearSession> {
        Ok(LinearSession::new())
    }
}
