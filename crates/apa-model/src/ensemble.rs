//! Ensemble (majority vote) feedback
//!
//! Each pipeline stage runs `m` independent replicas and keeps the majority
//! answer. Replicas share the stage's accuracy `p` and fail independently, so
//! the stage is correct when more than `m / 2` replicas are:
//!
//! `p' = sum_{k > m/2} C(m, k) * p^k * (1 - p)^(m - k)`
//!
//! Voting only helps when `p > 0.5`; below that it amplifies errors.

use crate::error::{check_probability, ModelError, ModelResult};
use crate::mechanism::FeedbackMechanism;
use crate::types::FeedbackStrategy;

/// Upper bound on replicas; keeps binomial coefficients finite in `f64`
pub const MAX_ENSEMBLE_MEMBERS: u32 = 999;

/// Odd number of voting replicas per stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ensemble {
    members: u32,
}

impl Ensemble {
    /// Create ensemble feedback
    ///
    /// # Errors
    /// `InvalidParameter` unless `members` is odd and in `1..=999`
    pub fn new(members: u32) -> ModelResult<Self> {
        if members % 2 == 0 || members > MAX_ENSEMBLE_MEMBERS {
            return Err(ModelError::invalid(
                "members",
                f64::from(members),
                "must be an odd count between 1 and 999",
            ));
        }
        Ok(Self { members })
    }

    /// Replicas per stage
    #[inline]
    #[must_use]
    pub fn members(&self) -> u32 {
        self.members
    }
}

impl FeedbackMechanism for Ensemble {
    fn effective_accuracy(&self, base_accuracy: f64) -> ModelResult<f64> {
        let p = check_probability("base_accuracy", base_accuracy)?;
        // Bounded by MAX_ENSEMBLE_MEMBERS at construction.
        let m = i32::try_from(self.members).unwrap_or(i32::MAX);
        let q = 1.0 - p;

        // C(m, k) built incrementally from C(m, 0) = 1.
        let mut coefficient = 1.0_f64;
        let mut total = 0.0_f64;
        for k in 0..=m {
            if k > m / 2 {
                total += coefficient * p.powi(k) * q.powi(m - k);
            }
            coefficient = coefficient * f64::from(m - k) / f64::from(k + 1);
        }
        Ok(total.clamp(0.0, 1.0))
    }

    fn strategy(&self) -> FeedbackStrategy {
        FeedbackStrategy::Ensemble
    }

    fn label(&self) -> String {
        format!("Ensemble ({})", self.members)
    }
}
