//! Shared proptest case counts.
//!
//! Pure arithmetic properties run the standard 256 cases. Properties that solve
//! a constraint system per case use [`solver_case_count`]. Under Miri both drop
//! to a handful of cases.
//!
//! # Usage
//!
//! ```ignore
//! use xorshift_predictor::test_config::solver_case_count;
//!
//! proptest! {
//!     #![proptest_config(ProptestConfig {
//!         cases: solver_case_count(),
//!         ..ProptestConfig::default()
//!     })]
//!     #[test]
//!     fn recovers_any_seed(word0 in any::<u64>(), word1 in any::<u64>()) {
//!         // test body
//!     }
//! }
//! ```

/// Case count for cheap properties: 256, or 5 under Miri.
#[must_use]
pub const fn miri_case_count() -> u32 {
    if cfg!(miri) {
        5
    } else {
        256
    }
}

/// Case count for properties that run a solve per case: 32, or 2 under Miri.
#[must_use]
pub const fn solver_case_count() -> u32 {
    if cfg!(miri) {
        2
    } else {
        32
    }
}
