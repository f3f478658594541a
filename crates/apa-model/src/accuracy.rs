//! Closed-form accuracy of a sequential pipeline
//!
//! With `n` agents that each succeed independently with probability `p`, the
//! pipeline succeeds with probability `A(p, n) = p^n`. This module exposes
//! `A`, its derivative in `p`, and the first-order and exact effect of
//! raising `p` by `delta`.
//!
//! All functions are pure. `n = 0` is the vacuous pipeline: `A = 1` and the
//! sensitivity is 0.

use crate::error::{check_agent_count, check_probability, ModelError, ModelResult};
use crate::types::{AccuracyResult, ImprovementEstimate, ImprovementGain, PipelineConfig};

#[inline]
fn accuracy_unchecked(p: f64, n: i32) -> f64 {
    p.powi(n)
}

#[inline]
fn sensitivity_unchecked(p: f64, n: i32) -> f64 {
    if n == 0 {
        0.0
    } else {
        f64::from(n) * p.powi(n - 1)
    }
}

/// Probability that all `n` agents succeed: `p^n`
///
/// # Errors
/// `InvalidParameter` if `p` is outside `[0, 1]` or `n < 0`
pub fn system_accuracy(p: f64, n: i32) -> ModelResult<f64> {
    let p = check_probability("p", p)?;
    let n = check_agent_count("n", n)?;
    Ok(accuracy_unchecked(p, n))
}

/// Derivative of system accuracy with respect to `p`: `n * p^(n-1)`
///
/// # Errors
/// `InvalidParameter` if `p` is outside `[0, 1]` or `n < 0`
pub fn sensitivity(p: f64, n: i32) -> ModelResult<f64> {
    let p = check_probability("p", p)?;
    let n = check_agent_count("n", n)?;
    Ok(sensitivity_unchecked(p, n))
}

/// First-order (Taylor) estimate of the system accuracy gain from `delta_p`
///
/// This is an approximation; see [`exact_improvement`] for the true value.
/// `delta_p` is not range-checked since the linear estimate is defined for any
/// step.
///
/// # Errors
/// `InvalidParameter` if `p` is outside `[0, 1]` or `n < 0`
pub fn feedback_improvement(p: f64, n: i32, delta_p: f64) -> ModelResult<f64> {
    Ok(sensitivity(p, n)? * delta_p)
}

/// Exact system accuracy gain from raising `p` to `p + delta_p`
///
/// # Errors
/// `InvalidParameter` if `p` or `p + delta_p` is outside `[0, 1]`, or `n < 0`
pub fn exact_improvement(p: f64, n: i32, delta_p: f64) -> ModelResult<f64> {
    let base = system_accuracy(p, n)?;
    let improved_p = check_probability("p + delta_p", p + delta_p)?;
    Ok(accuracy_unchecked(improved_p, n) - base)
}

/// Approximate and exact gain side by side
///
/// # Errors
/// Same as [`exact_improvement`]
pub fn improvement_estimate(p: f64, n: i32, delta_p: f64) -> ModelResult<ImprovementEstimate> {
    Ok(ImprovementEstimate {
        delta: delta_p,
        approx: feedback_improvement(p, n, delta_p)?,
        exact: exact_improvement(p, n, delta_p)?,
    })
}

/// Multiplicative gain factor `((p + delta_p) / p)^n`
///
/// # Errors
/// `InvalidParameter` if `p` is not in `(0, 1]`, `p + delta_p` is outside
/// `[0, 1]`, or `n < 0`
pub fn improvement_ratio(p: f64, delta_p: f64, n: i32) -> ModelResult<f64> {
    let p = check_probability("p", p)?;
    let n = check_agent_count("n", n)?;
    if p == 0.0 {
        return Err(ModelError::invalid(
            "p",
            p,
            "must be positive for a multiplicative ratio",
        ));
    }
    let improved_p = check_probability("p + delta_p", p + delta_p)?;
    Ok((improved_p / p).powi(n))
}

/// Full gain record for moving every agent from `base_p` to `improved_p`
///
/// # Errors
/// `InvalidParameter` if either accuracy is outside `[0, 1]`, `n < 0`, or the
/// base system accuracy is zero (relative gain undefined)
pub fn improvement_gain(base_p: f64, improved_p: f64, n: i32) -> ModelResult<ImprovementGain> {
    let base_system_accuracy = system_accuracy(base_p, n)?;
    let improved_system_accuracy = system_accuracy(improved_p, n)?;
    if base_system_accuracy == 0.0 {
        return Err(ModelError::invalid(
            "base_p",
            base_p,
            "base system accuracy must be positive for a relative gain",
        ));
    }

    let delta_p = improved_p - base_p;
    let absolute_gain = improved_system_accuracy - base_system_accuracy;

    Ok(ImprovementGain {
        agent_count: n,
        base_accuracy: base_p,
        improved_accuracy: improved_p,
        delta_p,
        base_system_accuracy,
        improved_system_accuracy,
        absolute_gain,
        relative_gain_pct: absolute_gain / base_system_accuracy * 100.0,
        multiplicative_ratio: improved_system_accuracy / base_system_accuracy,
        approx_gain: sensitivity_unchecked(base_p, n) * delta_p,
    })
}

/// Accuracy and sensitivity of an already validated pipeline
#[must_use]
pub fn evaluate(config: &PipelineConfig) -> AccuracyResult {
    let (p, n) = (config.base_accuracy(), config.agent_count());
    AccuracyResult {
        system_accuracy: accuracy_unchecked(p, n),
        sensitivity: sensitivity_unchecked(p, n),
    }
}
