//! Error types for the accuracy model
//!
//! The model has no I/O and no retryable failure modes; the only way an
//! operation can fail is by being handed a parameter outside its domain.

/// Accuracy model error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// A parameter is outside the domain of the formula
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in the operation signature
        name: &'static str,
        /// Offending value (agent counts are widened to `f64`)
        value: f64,
        /// What the parameter must satisfy
        reason: &'static str,
    },
}

impl ModelError {
    /// Create an invalid parameter error
    #[inline]
    #[must_use]
    pub fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }

    /// Name of the rejected parameter
    #[inline]
    #[must_use]
    pub fn parameter(&self) -> &'static str {
        match self {
            Self::InvalidParameter { name, .. } => name,
        }
    }
}

/// Result alias used throughout the model
pub type ModelResult<T> = Result<T, ModelError>;

/// Check that `value` is a probability in `[0, 1]`; rejects NaN.
pub(crate) fn check_probability(name: &'static str, value: f64) -> ModelResult<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ModelError::invalid(name, value, "must be within [0, 1]"))
    }
}

/// Check that an agent count is non-negative.
pub(crate) fn check_agent_count(name: &'static str, value: i32) -> ModelResult<i32> {
    if value >= 0 {
        Ok(value)
    } else {
        Err(ModelError::invalid(
            name,
            f64::from(value),
            "must be a non-negative agent count",
        ))
    }
}
