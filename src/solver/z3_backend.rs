//! Z3 bit-vector backend.
//!
//! Requires the `z3-backend` feature and a system Z3 (`apt install libz3-dev`), or
//! `z3-backend-bundled` to build Z3 from source.
//!
//! Sessions use the thread-local Z3 context; each owns its own [`Solver`], which
//! Z3 releases when the session is dropped.

use z3::ast::BV;
use z3::{Model, Solver};

use crate::solver::{BitVecSolver, SatResult, SolverBackend};
use crate::transition::Word;
use crate::{PredictorError, PredictorResult};

impl Word for BV {
    fn xor(&self, other: &Self) -> Self {
        self.bvxor(other)
    }

    fn shl(&self, amount: u32) -> Self {
        self.bvshl(&BV::from_u64(u64::from(amount), self.get_size()))
    }

    fn lshr(&self, amount: u32) -> Self {
        self.bvlshr(&BV::from_u64(u64::from(amount), self.get_size()))
    }
}

/// Backend producing [`Z3Session`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Z3Backend;

impl SolverBackend for Z3Backend {
    type Session = Z3Session;

    fn name(&self) -> &'static str {
        "z3"
    }

    fn open(&self) -> PredictorResult<Z3Session> {
        // Z3 aborts through a Rust panic when the native context cannot be created.
        match std::panic::catch_unwind(Solver::new) {
            Ok(solver) => Ok(Z3Session {
                solver,
                model: None,
            }),
            Err(_) => Err(PredictorError::SolverUnavailable {
                context: "failed to create a Z3 solver".to_owned(),
            }),
        }
    }
}

/// A Z3 solver session.
pub struct Z3Session {
    solver: Solver,
    model: Option<Model>,
}

impl std::fmt::Debug for Z3Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Z3Session")
            .field("has_model", &self.model.is_some())
            .finish_non_exhaustive()
    }
}

impl BitVecSolver for Z3Session {
    type Term = BV;

    fn declare(&mut self, name: &str, width: u32) -> PredictorResult<BV> {
        Ok(BV::new_const(name, width))
    }

    fn constant(&mut self, value: u64, width: u32) -> BV {
        BV::from_u64(value, width)
    }

    fn assert_eq(&mut self, lhs: &BV, rhs: &BV) {
        self.model = None;
        self.solver.assert(lhs.eq(rhs));
    }

    fn check(&mut self) -> SatResult {
        match self.solver.check() {
            z3::SatResult::Sat => {
                self.model = self.solver.get_model();
                SatResult::Sat
            }
            z3::SatResult::Unsat => {
                self.model = None;
                SatResult::Unsat
            }
            z3::SatResult::Unknown => {
                self.model = None;
                SatResult::Unknown
            }
        }
    }

    fn value_of(&self, term: &BV) -> Option<u64> {
        self.model
            .as_ref()
            .and_then(|model| model.eval(term, true))
            .and_then(|value| value.as_u64())
    }
}
