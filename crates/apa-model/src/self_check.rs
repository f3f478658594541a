//! Self-check feedback

use crate::error::{check_probability, ModelResult};
use crate::mechanism::FeedbackMechanism;
use crate::types::FeedbackStrategy;

/// Share of detected failures an agent actually repairs when checking itself
pub const SELF_CHECK_EFFICIENCY: f64 = 0.8;

/// Agent re-examines its own output before handing it on
///
/// Weaker than an independent verifier: `p' = p + (1 - p) * c * 0.8`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelfCheck {
    check_accuracy: f64,
}

impl SelfCheck {
    /// Create self-check feedback
    ///
    /// # Errors
    /// `InvalidParameter` if `check_accuracy` is outside `[0, 1]`
    pub fn new(check_accuracy: f64) -> ModelResult<Self> {
        Ok(Self {
            check_accuracy: check_probability("check_accuracy", check_accuracy)?,
        })
    }

    /// Accuracy of the self-check
    #[inline]
    #[must_use]
    pub fn check_accuracy(&self) -> f64 {
        self.check_accuracy
    }
}

impl FeedbackMechanism for SelfCheck {
    fn effective_accuracy(&self, base_accuracy: f64) -> ModelResult<f64> {
        let p = check_probability("base_accuracy", base_accuracy)?;
        Ok(p + (1.0 - p) * self.check_accuracy * SELF_CHECK_EFFICIENCY)
    }

    fn strategy(&self) -> FeedbackStrategy {
        FeedbackStrategy::SelfCheck
    }

    fn label(&self) -> String {
        "Self-check".to_string()
    }
}
