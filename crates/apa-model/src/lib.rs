//! APA Accuracy Model
//!
//! Closed-form accuracy of a sequential pipeline of independent agents, and
//! the effect of feedback techniques on it.
//!
//! # Core Concepts
//!
//! - [`system_accuracy`]: `A(p, n) = p^n`
//! - [`sensitivity`]: `dA/dp = n * p^(n-1)`
//! - [`feedback_improvement`] / [`exact_improvement`]: linear vs exact gain from `delta_p`
//! - [`improvement_ratio`]: multiplicative gain `((p + delta_p) / p)^n`
//! - [`FeedbackMechanism`]: maps `p` to an effective `p'` ([`Retry`],
//!   [`Verification`], [`SelfCheck`], [`Ensemble`])
//! - [`MechanismRegistry`]: ordered set of mechanisms to compare
//!
//! # Example
//!
//! ```rust
//! use apa_model::{system_accuracy, FeedbackMechanism, Retry};
//!
//! let baseline = system_accuracy(0.9, 5)?;
//! let retry = Retry::new(2)?;
//! let improved = system_accuracy(retry.effective_accuracy(0.9)?, 5)?;
//! assert!(improved > baseline);
//! # Ok::<(), apa_model::ModelError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod accuracy;
mod ensemble;
mod error;
mod mechanism;
mod registry;
mod retry;
mod self_check;
mod types;
mod verification;

// Re-exports
pub use accuracy::{
    evaluate, exact_improvement, feedback_improvement, improvement_estimate, improvement_gain,
    improvement_ratio, sensitivity, system_accuracy,
};
pub use ensemble::{Ensemble, MAX_ENSEMBLE_MEMBERS};
pub use error::{ModelError, ModelResult};
pub use mechanism::{FeedbackMechanism, MechanismSpec};
pub use registry::MechanismRegistry;
pub use retry::Retry;
pub use self_check::{SelfCheck, SELF_CHECK_EFFICIENCY};
pub use types::{
    AccuracyResult, FeedbackAdjustment, FeedbackStrategy, ImprovementEstimate, ImprovementGain,
    PipelineConfig,
};
pub use verification::Verification;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use apa_test_utils::assert_close;

    #[test]
    fn feedback_mechanisms_lift_pipeline_accuracy() {
        let config = PipelineConfig::new(5, 0.9).unwrap();
        let baseline = config.evaluate().system_accuracy;
        let registry = MechanismRegistry::with_defaults().unwrap();

        for mechanism in registry.iter() {
            let adjustment = mechanism.adjustment(config.base_accuracy()).unwrap();
            let improved = config.with_adjustment(adjustment).unwrap().evaluate();
            assert!(
                improved.system_accuracy > baseline,
                "{} should beat the baseline",
                mechanism.label()
            );
        }
    }

    #[test]
    fn reference_mechanism_figures() {
        let registry = MechanismRegistry::with_defaults().unwrap();
        let expected = [
            ("Verification", 0.995),
            ("Retry (2x)", 0.99),
            ("Self-check", 0.972),
            ("Retry (3x)", 0.999),
            ("Ensemble (3)", 0.972),
        ];
        for (label, p) in expected {
            let mechanism = registry.get(label).unwrap();
            assert_close(mechanism.effective_accuracy(0.9).unwrap(), p, 1e-12);
        }
    }
}
