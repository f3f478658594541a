//! Core value types for the accuracy model
//!
//! Every type here is plain immutable data: it is created by a single
//! computation and never mutated afterwards.

use crate::accuracy;
use crate::error::{check_agent_count, check_probability, ModelResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A sequential pipeline of independent agents sharing one per-agent accuracy
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PipelineConfig {
    agent_count: i32,
    base_accuracy: f64,
}

impl PipelineConfig {
    /// Create a validated pipeline configuration
    ///
    /// # Errors
    /// `InvalidParameter` if `agent_count < 0` or `base_accuracy` is outside `[0, 1]`
    pub fn new(agent_count: i32, base_accuracy: f64) -> ModelResult<Self> {
        Ok(Self {
            agent_count: check_agent_count("agent_count", agent_count)?,
            base_accuracy: check_probability("base_accuracy", base_accuracy)?,
        })
    }

    /// Number of agents in the pipeline
    #[inline]
    #[must_use]
    pub fn agent_count(&self) -> i32 {
        self.agent_count
    }

    /// Per-agent accuracy
    #[inline]
    #[must_use]
    pub fn base_accuracy(&self) -> f64 {
        self.base_accuracy
    }

    /// Same pipeline with a feedback adjustment applied to every agent
    ///
    /// # Errors
    /// `InvalidParameter` if the adjusted accuracy leaves `[0, 1]`
    pub fn with_adjustment(&self, adjustment: FeedbackAdjustment) -> ModelResult<Self> {
        Self::new(self.agent_count, self.base_accuracy + adjustment.delta)
    }

    /// Same per-agent accuracy, different depth
    ///
    /// # Errors
    /// `InvalidParameter` if `agent_count < 0`
    pub fn with_agent_count(&self, agent_count: i32) -> ModelResult<Self> {
        Self::new(agent_count, self.base_accuracy)
    }

    /// System accuracy and sensitivity of this pipeline
    #[must_use]
    pub fn evaluate(&self) -> AccuracyResult {
        accuracy::evaluate(self)
    }
}

/// Derived accuracy figures for a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracyResult {
    /// Probability that every agent succeeds
    pub system_accuracy: f64,
    /// dA/dp at the pipeline's per-agent accuracy
    pub sensitivity: f64,
}

/// Feedback technique whose net effect is modelled as an accuracy gain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStrategy {
    /// Re-run the agent on failure
    Retry,
    /// Independent verifier catches a share of failures
    Verification,
    /// The agent checks its own output
    SelfCheck,
    /// Majority vote over independent replicas
    Ensemble,
}

impl FeedbackStrategy {
    /// All strategies in declaration order
    pub const ALL: [Self; 4] = [
        Self::Retry,
        Self::Verification,
        Self::SelfCheck,
        Self::Ensemble,
    ];

    /// Stable identifier
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Retry => "retry",
            Self::Verification => "verification",
            Self::SelfCheck => "self_check",
            Self::Ensemble => "ensemble",
        }
    }
}

impl fmt::Display for FeedbackStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assumed per-agent accuracy gain from a feedback technique
///
/// Does not model the mechanism itself, only its net effect on `p`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedbackAdjustment {
    /// Change in per-agent accuracy
    pub delta: f64,
    /// Technique the gain is attributed to
    pub strategy: FeedbackStrategy,
}

impl FeedbackAdjustment {
    /// Create an adjustment
    #[inline]
    #[must_use]
    pub fn new(delta: f64, strategy: FeedbackStrategy) -> Self {
        Self { delta, strategy }
    }
}

/// First-order and exact improvement for one accuracy change
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImprovementEstimate {
    /// Per-agent accuracy change
    pub delta: f64,
    /// `n * p^(n-1) * delta`
    pub approx: f64,
    /// `(p + delta)^n - p^n`
    pub exact: f64,
}

impl ImprovementEstimate {
    /// Exact minus approximate (the Taylor remainder)
    #[inline]
    #[must_use]
    pub fn error(&self) -> f64 {
        self.exact - self.approx
    }
}

/// Full gain record for moving from a base to an improved per-agent accuracy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImprovementGain {
    /// Number of agents
    pub agent_count: i32,
    /// Per-agent accuracy before feedback
    pub base_accuracy: f64,
    /// Per-agent accuracy with feedback
    pub improved_accuracy: f64,
    /// `improved_accuracy - base_accuracy`
    pub delta_p: f64,
    /// System accuracy before feedback
    pub base_system_accuracy: f64,
    /// System accuracy with feedback
    pub improved_system_accuracy: f64,
    /// Improved minus base system accuracy
    pub absolute_gain: f64,
    /// Absolute gain relative to the base, in percent
    pub relative_gain_pct: f64,
    /// Improved over base system accuracy
    pub multiplicative_ratio: f64,
    /// First-order estimate of the absolute gain
    pub approx_gain: f64,
}
