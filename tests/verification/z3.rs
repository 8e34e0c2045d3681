//! Z3 cross-checks.
//!
//! Two kinds of test live here:
//!
//! - proofs about the transition itself, stated directly against Z3 bit-vectors
//!   (a property holds when its negation is unsatisfiable);
//! - the reference scenarios replayed through [`Z3Backend`], which must agree
//!   with the default linear backend.
//!
//! ## Running Z3 Tests
//!
//! ```bash
//! cargo test --test verification --features z3-backend
//! ```
//!
//! Use `z3-backend-bundled` instead to build Z3 from source (slow first build).

use z3::ast::BV;
use z3::{SatResult, Solver};

use xorshift_predictor::__internal::{recover_anchor, step, step_back, ConstraintSet};
use xorshift_predictor::prelude::*;
use xorshift_predictor::solver::Z3Backend;

use crate::common::{
    ARBITRARY, CHROME_ANCHOR, CHROME_EXPECTED, CHROME_OBSERVED, V8_ANCHOR, V8_EXPECTED,
    V8_OBSERVED,
};

// =============================================================================
// Transition proofs
// =============================================================================

/// Z3 Proof: step_back is a left inverse of step for every 128-bit state.
#[test]
fn z3_proof_step_back_inverts_step() {
    let solver = Solver::new();
    let s0 = BV::new_const("s0", 64);
    let s1 = BV::new_const("s1", 64);

    let (n0, n1) = step(&s0, &s1);
    let (b0, b1) = step_back(&n0, &n1);

    // Look for a state that does not round-trip
    let same = b0.eq(&s0) & b1.eq(&s1);
    solver.assert(same.not());

    assert_eq!(
        solver.check(),
        SatResult::Unsat,
        "Z3 should prove step_back(step(s)) == s for all states"
    );
}

/// Z3 Proof: step is injective, so the anchor behind an output stream is unique.
#[test]
fn z3_proof_step_is_injective() {
    let solver = Solver::new();
    let a0 = BV::new_const("a0", 64);
    let a1 = BV::new_const("a1", 64);
    let b0 = BV::new_const("b0", 64);
    let b1 = BV::new_const("b1", 64);

    let (na0, na1) = step(&a0, &a1);
    let (nb0, nb1) = step(&b0, &b1);

    solver.assert(na0.eq(&nb0) & na1.eq(&nb1));
    solver.assert((a0.eq(&b0) & a1.eq(&b1)).not());

    assert_eq!(
        solver.check(),
        SatResult::Unsat,
        "Z3 should prove distinct states never step to the same successor"
    );
}

// =============================================================================
// Reference scenarios through the Z3 backend
// =============================================================================

#[test]
fn z3_backend_recovers_reference_anchors() {
    let v8 = ConstraintSet::from_chronological(&V8_OBSERVED, Flavor::V8);
    assert_eq!(recover_anchor(&Z3Backend, &v8, true).unwrap(), V8_ANCHOR);

    let chrome = ConstraintSet::from_chronological(&CHROME_OBSERVED, Flavor::Chrome);
    assert_eq!(recover_anchor(&Z3Backend, &chrome, true).unwrap(), CHROME_ANCHOR);
}

#[test]
fn z3_backend_predicts_reference_sequences() {
    let mut v8 = PredictorBuilder::new()
        .with_backend(Z3Backend)
        .start_v8(&V8_OBSERVED)
        .unwrap();
    assert_eq!(v8.predict_next(5).unwrap(), V8_EXPECTED.to_vec());

    let mut chrome = PredictorBuilder::new()
        .with_backend(Z3Backend)
        .start_chrome(&CHROME_OBSERVED)
        .unwrap();
    assert_eq!(chrome.predict_next(5), CHROME_EXPECTED.to_vec());
}

#[test]
fn z3_backend_rejects_arbitrary_sequence() {
    let err = PredictorBuilder::new()
        .with_backend(Z3Backend)
        .start_chrome(&ARBITRARY)
        .unwrap_err();
    assert!(matches!(
        err,
        PredictorError::ReconstructionError {
            flavor: Flavor::Chrome,
            ..
        }
    ));
}
