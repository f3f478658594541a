//! Verification feedback
//!
//! An independent verifier inspects every agent output and catches a fixed
//! share of the failures, which are then corrected.

use crate::error::{check_probability, ModelResult};
use crate::mechanism::FeedbackMechanism;
use crate::types::FeedbackStrategy;

/// Verifier that catches `verifier_accuracy` of all failures
///
/// `p' = p + (1 - p) * v`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verification {
    verifier_accuracy: f64,
}

impl Verification {
    /// Create verification feedback
    ///
    /// # Errors
    /// `InvalidParameter` if `verifier_accuracy` is outside `[0, 1]`
    pub fn new(verifier_accuracy: f64) -> ModelResult<Self> {
        Ok(Self {
            verifier_accuracy: check_probability("verifier_accuracy", verifier_accuracy)?,
        })
    }

    /// Share of failures the verifier catches
    #[inline]
    #[must_use]
    pub fn verifier_accuracy(&self) -> f64 {
        self.verifier_accuracy
    }
}

impl FeedbackMechanism for Verification {
    fn effective_accuracy(&self, base_accuracy: f64) -> ModelResult<f64> {
        let p = check_probability("base_accuracy", base_accuracy)?;
        Ok(p + (1.0 - p) * self.verifier_accuracy)
    }

    fn strategy(&self) -> FeedbackStrategy {
        FeedbackStrategy::Verification
    }

    fn label(&self) -> String {
        "Verification".to_string()
    }
}
