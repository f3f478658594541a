//! Scenario runner
//!
//! Iterates the accuracy model over parameter grids and collects plain
//! numeric rows. Nothing here formats or renders; see [`crate::report`] and
//! [`crate::chart`] for that.
//!
//! Every function recomputes from its inputs, so calling one twice with the
//! same arguments yields the same rows.

use crate::error::ScenarioResult;
use apa_model::{
    improvement_estimate, improvement_gain, system_accuracy, FeedbackStrategy, MechanismRegistry,
    ModelResult, PipelineConfig,
};
use serde::Serialize;

/// `gain / baseline` in percent; `None` when the baseline is zero, including
/// when `p^n` underflows
fn relative_gain_pct(gain: f64, baseline: f64) -> Option<f64> {
    (baseline > 0.0).then(|| gain / baseline * 100.0)
}

/// One point of a decay curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecayPoint {
    /// Pipeline depth
    pub agent_count: i32,
    /// `p^n`
    pub system_accuracy: f64,
}

/// System accuracy over depths `1..=max_agents` for one per-agent accuracy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecaySeries {
    /// Per-agent accuracy
    pub accuracy: f64,
    /// Points ordered by ascending depth
    pub points: Vec<DecayPoint>,
}

impl DecaySeries {
    /// Accuracy at a given depth, if it is part of the series
    #[must_use]
    pub fn at(&self, agent_count: i32) -> Option<f64> {
        self.points
            .iter()
            .find(|pt| pt.agent_count == agent_count)
            .map(|pt| pt.system_accuracy)
    }
}

/// Lazily evaluated decay curve for one accuracy
///
/// The iterator is `Clone`, so a caller can restart it without recomputing
/// anything up front.
///
/// # Errors
/// `InvalidParameter` if `p` is outside `[0, 1]` or `max_agents < 0`
pub fn decay_points(
    p: f64,
    max_agents: i32,
) -> ModelResult<impl Iterator<Item = DecayPoint> + Clone> {
    // Validate once; every later evaluation is in range.
    system_accuracy(p, max_agents)?;
    Ok((1..=max_agents).map(move |n| DecayPoint {
        agent_count: n,
        system_accuracy: p.powi(n),
    }))
}

/// Decay curves for each accuracy, in input order
///
/// # Errors
/// `InvalidParameter` for the first accuracy outside `[0, 1]`, or if
/// `max_agents < 0`
pub fn decay_series(accuracies: &[f64], max_agents: i32) -> ScenarioResult<Vec<DecaySeries>> {
    tracing::debug!(
        accuracies = accuracies.len(),
        max_agents,
        "computing decay series"
    );
    accuracies
        .iter()
        .map(|&p| {
            Ok(DecaySeries {
                accuracy: p,
                points: decay_points(p, max_agents)?.collect(),
            })
        })
        .collect()
}

/// Baseline versus improved system accuracy at one depth
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeedbackComparison {
    /// Pipeline depth
    pub agent_count: i32,
    /// System accuracy at the baseline per-agent accuracy
    pub baseline: f64,
    /// System accuracy at the improved per-agent accuracy
    pub improved: f64,
    /// `(improved - baseline) / baseline * 100`
    pub improvement_pct: f64,
}

/// Compare system accuracy before and after a per-agent improvement
///
/// # Errors
/// `InvalidParameter` if either accuracy is outside `[0, 1]`, `n < 0`, or the
/// baseline system accuracy is zero
pub fn feedback_comparison(
    n: i32,
    baseline_p: f64,
    improved_p: f64,
) -> ScenarioResult<FeedbackComparison> {
    let gain = improvement_gain(baseline_p, improved_p, n)?;
    Ok(FeedbackComparison {
        agent_count: n,
        baseline: gain.base_system_accuracy,
        improved: gain.improved_system_accuracy,
        improvement_pct: gain.relative_gain_pct,
    })
}

/// One row of the sensitivity table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrategyRow {
    /// Per-agent accuracy gain
    pub delta: f64,
    /// `p + delta`
    pub improved_accuracy: f64,
    /// System accuracy at `p`
    pub baseline_system_accuracy: f64,
    /// System accuracy at `p + delta`
    pub improved_system_accuracy: f64,
    /// Linear estimate of the gain
    pub approx: f64,
    /// Exact gain
    pub exact: f64,
    /// Exact gain relative to the baseline, in percent; absent for a zero
    /// baseline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_gain_pct: Option<f64>,
}

/// Sensitivity table: approximate and exact gain for each `delta`, in input order
///
/// # Errors
/// `InvalidParameter` if `p` or any `p + delta` is outside `[0, 1]`, or `n < 0`
pub fn strategy_table(n: i32, p: f64, deltas: &[f64]) -> ScenarioResult<Vec<StrategyRow>> {
    tracing::debug!(n, p, deltas = deltas.len(), "computing sensitivity table");
    let baseline = system_accuracy(p, n)?;

    deltas
        .iter()
        .map(|&delta| {
            let estimate = improvement_estimate(p, n, delta)?;
            Ok(StrategyRow {
                delta,
                improved_accuracy: p + delta,
                baseline_system_accuracy: baseline,
                improved_system_accuracy: baseline + estimate.exact,
                approx: estimate.approx,
                exact: estimate.exact,
                relative_gain_pct: relative_gain_pct(estimate.exact, baseline),
            })
        })
        .collect()
}

/// One pipeline in a depth trade-off comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TradeoffRow {
    /// Pipeline depth
    pub agent_count: i32,
    /// Per-agent accuracy
    pub accuracy: f64,
    /// `accuracy^agent_count`
    pub system_accuracy: f64,
}

impl TradeoffRow {
    fn from_config(config: PipelineConfig) -> Self {
        Self {
            agent_count: config.agent_count(),
            accuracy: config.base_accuracy(),
            system_accuracy: config.evaluate().system_accuracy,
        }
    }
}

/// Fewer agents versus better agents, against a common baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DepthTradeoff {
    /// Original pipeline
    pub baseline: TradeoffRow,
    /// Same accuracy, shorter pipeline
    pub fewer_agents: TradeoffRow,
    /// Same depth, better agents
    pub better_agents: TradeoffRow,
}

impl DepthTradeoff {
    /// Rows with their labels, baseline first
    #[must_use]
    pub fn rows(&self) -> [(&'static str, TradeoffRow); 3] {
        [
            ("Baseline", self.baseline),
            ("Fewer agents", self.fewer_agents),
            ("Better agents", self.better_agents),
        ]
    }
}

/// Compare shortening the pipeline with improving its agents
///
/// # Errors
/// `InvalidParameter` if any accuracy is outside `[0, 1]` or any depth is negative
pub fn depth_tradeoff(
    base_n: i32,
    base_p: f64,
    reduced_n: i32,
    improved_p: f64,
) -> ScenarioResult<DepthTradeoff> {
    let baseline = PipelineConfig::new(base_n, base_p)?;
    Ok(DepthTradeoff {
        baseline: TradeoffRow::from_config(baseline),
        fewer_agents: TradeoffRow::from_config(baseline.with_agent_count(reduced_n)?),
        better_agents: TradeoffRow::from_config(PipelineConfig::new(base_n, improved_p)?),
    })
}

/// One mechanism's effect on a pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MechanismRow {
    /// Mechanism label
    pub label: String,
    /// Strategy family
    pub strategy: FeedbackStrategy,
    /// Per-agent accuracy with the mechanism
    pub effective_accuracy: f64,
    /// Effective minus base accuracy
    pub delta: f64,
    /// Pipeline accuracy with the mechanism
    pub system_accuracy: f64,
    /// Gain over the baseline pipeline, in percent; absent for a zero baseline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_gain_pct: Option<f64>,
}

/// Every registered mechanism applied to the same pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MechanismComparison {
    /// Pipeline depth
    pub agent_count: i32,
    /// Per-agent accuracy without feedback
    pub base_accuracy: f64,
    /// Pipeline accuracy without feedback
    pub baseline_system_accuracy: f64,
    /// One row per mechanism, in registry order
    pub rows: Vec<MechanismRow>,
}

/// Apply each mechanism to an `n`-agent pipeline of accuracy `p`
///
/// # Errors
/// `InvalidParameter` if `p` is outside `[0, 1]` or `n < 0`
pub fn mechanism_comparison(
    n: i32,
    p: f64,
    mechanisms: &MechanismRegistry,
) -> ScenarioResult<MechanismComparison> {
    tracing::debug!(n, p, mechanisms = mechanisms.len(), "comparing mechanisms");
    let config = PipelineConfig::new(n, p)?;
    let baseline = config.evaluate().system_accuracy;

    let rows = mechanisms
        .iter()
        .map(|mechanism| {
            let adjustment = mechanism.adjustment(p)?;
            let improved = config.with_adjustment(adjustment)?.evaluate();
            Ok(MechanismRow {
                label: mechanism.label(),
                strategy: adjustment.strategy,
                effective_accuracy: p + adjustment.delta,
                delta: adjustment.delta,
                system_accuracy: improved.system_accuracy,
                relative_gain_pct: relative_gain_pct(
                    improved.system_accuracy - baseline,
                    baseline,
                ),
            })
        })
        .collect::<ModelResult<Vec<_>>>()?;

    Ok(MechanismComparison {
        agent_count: n,
        base_accuracy: p,
        baseline_system_accuracy: baseline,
        rows,
    })
}

/// Improved decay curve for one feedback gain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackCurve {
    /// Per-agent accuracy gain
    pub delta: f64,
    /// Decay curve at `base + delta`
    pub series: DecaySeries,
}

/// Baseline decay curve plus one curve per feedback gain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackCurves {
    /// Curve without feedback
    pub baseline: DecaySeries,
    /// Curves with feedback, in input order
    pub improved: Vec<FeedbackCurve>,
}

/// Decay curves with and without feedback
///
/// # Errors
/// `InvalidParameter` if `base_p` or any `base_p + delta` is outside `[0, 1]`,
/// or `max_agents < 0`
pub fn feedback_curves(
    base_p: f64,
    deltas: &[f64],
    max_agents: i32,
) -> ScenarioResult<FeedbackCurves> {
    let baseline = DecaySeries {
        accuracy: base_p,
        points: decay_points(base_p, max_agents)?.collect(),
    };
    let improved = deltas
        .iter()
        .map(|&delta| {
            let p = base_p + delta;
            Ok(FeedbackCurve {
                delta,
                series: DecaySeries {
                    accuracy: p,
                    points: decay_points(p, max_agents)?.collect(),
                },
            })
        })
        .collect::<ModelResult<Vec<_>>>()?;
    Ok(FeedbackCurves { baseline, improved })
}
