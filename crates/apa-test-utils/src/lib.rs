//! Testing utilities for APA workspace
//!
//! Shared float assertions and `proptest` strategies.

#![allow(missing_docs)]

use proptest::prelude::*;

/// Assert `actual` is within `tolerance` of `expected`.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

/// Assert every value in a slice is within `[0, 1]`.
#[track_caller]
pub fn assert_probabilities(values: &[f64]) {
    for (i, v) in values.iter().enumerate() {
        assert!((0.0..=1.0).contains(v), "value {i} = {v} is not a probability");
    }
}

/// Any probability, endpoints included.
pub fn probability() -> impl Strategy<Value = f64> {
    prop_oneof![
        1 => Just(0.0),
        1 => Just(1.0),
        8 => 0.0..=1.0f64,
    ]
}

/// Probability strictly inside `(0, 1)`, kept away from the endpoints so
/// powers stay distinguishable in `f64`.
pub fn interior_probability() -> impl Strategy<Value = f64> {
    0.05..0.99f64
}

/// Agent counts small enough that interior powers do not underflow.
pub fn agent_count() -> impl Strategy<Value = i32> {
    0..50i32
}

/// Values outside `[0, 1]`.
pub fn invalid_probability() -> impl Strategy<Value = f64> {
    prop_oneof![-10.0..-1e-9f64, (1.0 + 1e-9)..10.0f64]
}
