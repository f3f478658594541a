//! Feedback mechanism trait and configuration spec
//!
//! Provides the [`FeedbackMechanism`] trait: a feedback technique maps the
//! per-agent accuracy `p` to an effective accuracy `p'`, which is then fed back
//! into the closed-form pipeline model.

use crate::ensemble::Ensemble;
use crate::error::ModelResult;
use crate::retry::Retry;
use crate::self_check::SelfCheck;
use crate::types::{FeedbackAdjustment, FeedbackStrategy};
use crate::verification::Verification;
use serde::{Deserialize, Serialize};

/// Feedback technique applied independently to every agent
///
/// Implementations validate their own parameters at construction, so
/// [`effective_accuracy`](Self::effective_accuracy) only fails on an invalid
/// base accuracy.
pub trait FeedbackMechanism: Send + Sync + std::fmt::Debug {
    /// Per-agent accuracy once the mechanism is in place
    ///
    /// # Errors
    /// `InvalidParameter` if `base_accuracy` is outside `[0, 1]`
    fn effective_accuracy(&self, base_accuracy: f64) -> ModelResult<f64>;

    /// Strategy family this mechanism belongs to
    fn strategy(&self) -> FeedbackStrategy;

    /// Human readable label including parameters, e.g. `Retry (2x)`
    fn label(&self) -> String;

    /// Net effect of the mechanism as an accuracy delta
    ///
    /// # Errors
    /// Same as [`effective_accuracy`](Self::effective_accuracy)
    fn adjustment(&self, base_accuracy: f64) -> ModelResult<FeedbackAdjustment> {
        let improved = self.effective_accuracy(base_accuracy)?;
        Ok(FeedbackAdjustment::new(
            improved - base_accuracy,
            self.strategy(),
        ))
    }
}

/// Serializable description of a mechanism, as written in scenario files
///
/// ```toml
/// [[mechanisms]]
/// kind = "retry"
/// attempts = 2
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MechanismSpec {
    /// See [`Verification`]
    Verification {
        /// Share of failures the verifier catches
        verifier_accuracy: f64,
    },
    /// See [`Retry`]
    Retry {
        /// Total attempts per agent
        attempts: u32,
    },
    /// See [`SelfCheck`]
    SelfCheck {
        /// Accuracy of the self-check
        check_accuracy: f64,
    },
    /// See [`Ensemble`]
    Ensemble {
        /// Number of voting replicas
        members: u32,
    },
}

impl MechanismSpec {
    /// Strategy family of the described mechanism
    #[must_use]
    pub fn strategy(&self) -> FeedbackStrategy {
        match self {
            Self::Verification { .. } => FeedbackStrategy::Verification,
            Self::Retry { .. } => FeedbackStrategy::Retry,
            Self::SelfCheck { .. } => FeedbackStrategy::SelfCheck,
            Self::Ensemble { .. } => FeedbackStrategy::Ensemble,
        }
    }

    /// Instantiate the mechanism
    ///
    /// # Errors
    /// `InvalidParameter` if the mechanism's parameters are out of range
    pub fn build(&self) -> ModelResult<Box<dyn FeedbackMechanism>> {
        Ok(match *self {
            Self::Verification { verifier_accuracy } => {
                Box::new(Verification::new(verifier_accuracy)?)
            }
            Self::Retry { attempts } => Box::new(Retry::new(attempts)?),
            Self::SelfCheck { check_accuracy } => Box::new(SelfCheck::new(check_accuracy)?),
            Self::Ensemble { members } => Box::new(Ensemble::new(members)?),
        })
    }

    /// Mechanisms compared in the reference analysis
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::Verification {
                verifier_accuracy: 0.95,
            },
            Self::Retry { attempts: 2 },
            Self::SelfCheck {
                check_accuracy: 0.90,
            },
            Self::Retry { attempts: 3 },
            Self::Ensemble { members: 3 },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn spec_builds_matching_strategy() {
        for spec in MechanismSpec::defaults() {
            let mechanism = spec.build().unwrap();
            assert_eq!(mechanism.strategy(), spec.strategy());
        }
    }

    #[test]
    fn spec_rejects_bad_parameters() {
        assert!(MechanismSpec::Retry { attempts: 0 }.build().is_err());
        assert!(MechanismSpec::Ensemble { members: 2 }.build().is_err());
        assert!(MechanismSpec::Verification {
            verifier_accuracy: 1.5
        }
        .build()
        .is_err());
    }

    #[test]
    fn spec_json_is_internally_tagged() {
        let spec: MechanismSpec =
            serde_json::from_str(r#"{"kind":"self_check","check_accuracy":0.9}"#).unwrap();
        assert_eq!(
            spec,
            MechanismSpec::SelfCheck {
                check_accuracy: 0.9
            }
        );
    }

    #[test]
    fn adjustment_is_effective_minus_base() {
        let retry = Retry::new(2).unwrap();
        let adj = retry.adjustment(0.9).unwrap();
        assert_eq!(adj.strategy, FeedbackStrategy::Retry);
        assert!((adj.delta - 0.09).abs() < 1e-12);
    }
}
