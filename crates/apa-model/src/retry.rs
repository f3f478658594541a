//! Retry feedback
//!
//! Failed calls are detected and re-run. Attempts are independent, so the
//! agent only fails when every attempt fails.

use crate::error::{check_probability, ModelError, ModelResult};
use crate::mechanism::FeedbackMechanism;
use crate::types::FeedbackStrategy;

/// Up to `attempts` independent tries per agent
///
/// `p' = 1 - (1 - p)^k`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retry {
    attempts: u32,
}

impl Retry {
    /// Create retry feedback
    ///
    /// # Errors
    /// `InvalidParameter` if `attempts` is zero or exceeds `i32::MAX`
    pub fn new(attempts: u32) -> ModelResult<Self> {
        if attempts == 0 || i32::try_from(attempts).is_err() {
            return Err(ModelError::invalid(
                "attempts",
                f64::from(attempts),
                "must be between 1 and i32::MAX",
            ));
        }
        Ok(Self { attempts })
    }

    /// Total attempts, including the first
    #[inline]
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

impl FeedbackMechanism for Retry {
    fn effective_accuracy(&self, base_accuracy: f64) -> ModelResult<f64> {
        let p = check_probability("base_accuracy", base_accuracy)?;
        // Range checked in `new`.
        let k = i32::try_from(self.attempts).unwrap_or(i32::MAX);
        Ok(1.0 - (1.0 - p).powi(k))
    }

    fn strategy(&self) -> FeedbackStrategy {
        FeedbackStrategy::Retry
    }

    fn label(&self) -> String {
        format!("Retry ({}x)", self.attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apa_test_utils::assert_close;

    #[test]
    fn two_and_three_attempts() {
        assert_close(Retry::new(2).unwrap().effective_accuracy(0.9).unwrap(), 0.99, 1e-12);
        assert_close(Retry::new(3).unwrap().effective_accuracy(0.9).unwrap(), 0.999, 1e-12);
    }

    #[test]
    fn single_attempt_is_identity() {
        let retry = Retry::new(1).unwrap();
        for p in [0.0, 0.1, 0.5, 0.9, 1.0] {
            assert_close(retry.effective_accuracy(p).unwrap(), p, 1e-12);
        }
    }

    #[test]
    fn zero_attempts_rejected() {
        assert!(Retry::new(0).is_err());
    }

    #[test]
    fn label_names_attempts() {
        assert_eq!(Retry::new(3).unwrap().label(), "Retry (3x)");
    }
}
