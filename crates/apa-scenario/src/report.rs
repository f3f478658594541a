//! Full analysis report
//!
//! [`run_analysis`] computes every section of a [`ScenarioConfig`]. The
//! resulting [`AnalysisReport`] renders as console text through `Display`
//! and as JSON through serde.

use crate::config::ScenarioConfig;
use crate::error::ScenarioResult;
use crate::runner::{
    decay_series, depth_tradeoff, mechanism_comparison, strategy_table, DecaySeries,
    DepthTradeoff, MechanismComparison, StrategyRow,
};
use apa_model::{improvement_gain, ImprovementGain};
use serde::Serialize;
use std::fmt;

const RULE: &str = "----------------------------------------";
const DOUBLE_RULE: &str = "========================================";

struct Percent(Option<f64>);

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(pct) if f.sign_plus() => write!(f, "{pct:+.2}%"),
            Some(pct) => write!(f, "{pct:.2}%"),
            None => f.write_str("n/a"),
        }
    }
}

/// Sensitivity table with the pipeline it was computed for
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensitivityTable {
    /// Pipeline depth
    pub agent_count: i32,
    /// Per-agent accuracy before any gain
    pub base_accuracy: f64,
    /// One row per accuracy gain
    pub rows: Vec<StrategyRow>,
}

/// Every computed section of an analysis run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Base versus improved accuracy at one depth
    pub paper_example: ImprovementGain,
    /// Decay curves
    pub decay: Vec<DecaySeries>,
    /// Linear versus exact gains
    pub sensitivity: SensitivityTable,
    /// Fewer versus better agents
    pub depth_tradeoff: DepthTradeoff,
    /// Feedback mechanisms
    pub mechanisms: MechanismComparison,
}

/// Compute every section of the analysis
///
/// # Errors
/// `InvalidSection` if the config fails validation, `Model` if a section's
/// computation is undefined (e.g. a zero baseline)
pub fn run_analysis(config: &ScenarioConfig) -> ScenarioResult<AnalysisReport> {
    config.validate()?;

    let ex = &config.paper_example;
    tracing::info!(n = ex.agent_count, "computing numerical example");
    let paper_example = improvement_gain(ex.base_accuracy, ex.improved_accuracy, ex.agent_count)?;

    tracing::info!(
        accuracies = config.decay.accuracies.len(),
        "computing exponential decay"
    );
    let decay = decay_series(&config.decay.accuracies, config.decay.max_agents)?;

    let s = &config.sensitivity;
    tracing::info!(n = s.agent_count, p = s.base_accuracy, "computing sensitivity");
    let sensitivity = SensitivityTable {
        agent_count: s.agent_count,
        base_accuracy: s.base_accuracy,
        rows: strategy_table(s.agent_count, s.base_accuracy, &s.deltas)?,
    };

    let t = &config.depth_tradeoff;
    tracing::info!("computing depth trade-off");
    let tradeoff = depth_tradeoff(
        t.agent_count,
        t.base_accuracy,
        t.reduced_agent_count,
        t.improved_accuracy,
    )?;

    let m = &config.mechanisms;
    tracing::info!(mechanisms = m.mechanisms.len(), "computing feedback mechanisms");
    let mechanisms = mechanism_comparison(m.agent_count, m.base_accuracy, &m.registry()?)?;

    Ok(AnalysisReport {
        paper_example,
        decay,
        sensitivity,
        depth_tradeoff: tradeoff,
        mechanisms,
    })
}

impl AnalysisReport {
    /// Console rendering of the whole report
    #[must_use]
    pub fn render_text(&self) -> String {
        self.to_string()
    }

    /// Pretty-printed JSON
    ///
    /// # Errors
    /// `Json` if serialization fails
    pub fn to_json(&self) -> ScenarioResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Write the numerical example section
pub fn write_paper_example(f: &mut impl fmt::Write, gain: &ImprovementGain) -> fmt::Result {
    let n = gain.agent_count;
    writeln!(f, "Numerical Example")?;
    writeln!(f, "{RULE}")?;
    writeln!(f, "n = {n}, p = {:.2}", gain.base_accuracy)?;
    writeln!(
        f,
        "A({p:.2}) = {p:.2}^{n} = {:.5}",
        gain.base_system_accuracy,
        p = gain.base_accuracy
    )?;
    writeln!(f)?;
    writeln!(f, "With feedback: p = {:.2}", gain.improved_accuracy)?;
    writeln!(
        f,
        "A({p:.2}) = {p:.2}^{n} = {:.5}",
        gain.improved_system_accuracy,
        p = gain.improved_accuracy
    )?;
    writeln!(f)?;
    writeln!(f, "Improvement: {:.2}%", gain.relative_gain_pct)?;
    writeln!(
        f,
        "Linear estimate: {:+.5} (exact {:+.5})",
        gain.approx_gain, gain.absolute_gain
    )
}

/// Write decay curves as one table row per point
pub fn write_decay_table(f: &mut impl fmt::Write, series: &[DecaySeries]) -> fmt::Result {
    writeln!(
        f,
        "{:>14} {:>10} {:>15} {:>23}",
        "agent_accuracy", "num_agents", "system_accuracy", "system_accuracy_percent"
    )?;
    for s in series {
        for pt in &s.points {
            writeln!(
                f,
                "{:>14.2} {:>10} {:>15.6} {:>23.4}",
                s.accuracy,
                pt.agent_count,
                pt.system_accuracy,
                pt.system_accuracy * 100.0
            )?;
        }
    }
    Ok(())
}

/// Write the sensitivity table
pub fn write_sensitivity(f: &mut impl fmt::Write, table: &SensitivityTable) -> fmt::Result {
    writeln!(
        f,
        "Sensitivity Analysis (n = {}, p = {:.2})",
        table.agent_count, table.base_accuracy
    )?;
    writeln!(f, "{RULE}")?;
    for row in &table.rows {
        writeln!(
            f,
            "Δp = +{:.2}: {:.5} → {:.5} (gain: {}, linear: {:.5}, exact: {:.5})",
            row.delta,
            row.baseline_system_accuracy,
            row.improved_system_accuracy,
            Percent(row.relative_gain_pct),
            row.approx,
            row.exact
        )?;
    }
    Ok(())
}

/// Write the depth trade-off comparison
pub fn write_depth_tradeoff(f: &mut impl fmt::Write, tradeoff: &DepthTradeoff) -> fmt::Result {
    writeln!(f, "Strategy Comparison")?;
    writeln!(f, "{RULE}")?;
    for (label, row) in tradeoff.rows() {
        writeln!(
            f,
            "{label}: n={}, p={:.2} → A={:.5}",
            row.agent_count, row.accuracy, row.system_accuracy
        )?;
    }
    Ok(())
}

/// Write the feedback mechanism comparison
pub fn write_mechanisms(f: &mut impl fmt::Write, cmp: &MechanismComparison) -> fmt::Result {
    writeln!(
        f,
        "Feedback Mechanisms (n={}, p={:.2})",
        cmp.agent_count, cmp.base_accuracy
    )?;
    writeln!(f, "{RULE}")?;
    writeln!(f, "Baseline: A = {:.5}", cmp.baseline_system_accuracy)?;
    writeln!(f)?;
    for row in &cmp.rows {
        writeln!(
            f,
            "{}: p'={:.4} → A={:.5} ({:+})",
            row.label,
            row.effective_accuracy,
            row.system_accuracy,
            Percent(row.relative_gain_pct)
        )?;
    }
    Ok(())
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sequential Agentic AI Pipeline Analysis")?;
        writeln!(f, "{DOUBLE_RULE}")?;
        writeln!(f)?;
        write_paper_example(f, &self.paper_example)?;
        writeln!(f)?;
        writeln!(f, "Exponential Decay")?;
        writeln!(f, "{RULE}")?;
        write_decay_table(f, &self.decay)?;
        writeln!(f)?;
        write_sensitivity(f, &self.sensitivity)?;
        writeln!(f)?;
        write_depth_tradeoff(f, &self.depth_tradeoff)?;
        writeln!(f)?;
        write_mechanisms(f, &self.mechanisms)
    }
}
