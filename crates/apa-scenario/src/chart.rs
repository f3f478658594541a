//! Chart series export
//!
//! Rendering is left to an external tool; this module only shapes the decay
//! and feedback curves into labelled panels and writes them as JSON.

use crate::config::ChartConfig;
use crate::error::{ScenarioError, ScenarioResult};
use crate::runner::{decay_series, feedback_curves, DecayPoint};
use serde::Serialize;
use std::path::Path;

/// A labelled line on a panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    /// Legend entry
    pub label: String,
    /// Per-agent accuracy of the line
    pub accuracy: f64,
    /// Whether this is the no-feedback reference line
    pub baseline: bool,
    /// Points by ascending depth
    pub points: Vec<DecayPoint>,
}

/// One chart panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPanel {
    /// Panel title
    pub title: String,
    /// X axis label
    pub x_label: &'static str,
    /// Y axis label
    pub y_label: &'static str,
    /// Lines in legend order
    pub series: Vec<ChartSeries>,
}

/// Both panels of the analysis chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    /// System accuracy versus depth for several accuracies
    pub decay: ChartPanel,
    /// System accuracy with and without feedback
    pub feedback: ChartPanel,
}

impl ChartData {
    /// Pretty-printed JSON
    ///
    /// # Errors
    /// `Json` if serialization fails
    pub fn to_json(&self) -> ScenarioResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON document to `path`, replacing any existing file
    ///
    /// # Errors
    /// `Io` if the file cannot be written
    pub fn write_json(&self, path: impl AsRef<Path>) -> ScenarioResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "wrote chart data");
        Ok(())
    }
}

/// Compute both chart panels
///
/// # Errors
/// `InvalidParameter` if any accuracy, or base plus delta, is outside `[0, 1]`
pub fn chart_data(config: &ChartConfig) -> ScenarioResult<ChartData> {
    let decay = decay_series(&config.decay_accuracies, config.max_agents)?
        .into_iter()
        .map(|s| ChartSeries {
            label: format!("p = {}", s.accuracy),
            accuracy: s.accuracy,
            baseline: false,
            points: s.points,
        })
        .collect();

    let base = config.feedback_base_accuracy;
    let curves = feedback_curves(base, &config.feedback_deltas, config.max_agents)?;
    let mut feedback = Vec::with_capacity(curves.improved.len() + 1);
    feedback.push(ChartSeries {
        label: format!("No feedback (p = {base:.2})"),
        accuracy: base,
        baseline: true,
        points: curves.baseline.points,
    });
    feedback.extend(curves.improved.into_iter().map(|c| ChartSeries {
        label: format!(
            "With feedback: p = {:.2} (+{:.2})",
            c.series.accuracy, c.delta
        ),
        accuracy: c.series.accuracy,
        baseline: false,
        points: c.series.points,
    }));

    Ok(ChartData {
        decay: ChartPanel {
            title: "Exponential Decay: System Accuracy vs Pipeline Depth".to_string(),
            x_label: "Number of Agents (n)",
            y_label: "System Accuracy A(p)",
            series: decay,
        },
        feedback: ChartPanel {
            title: format!("System Accuracy With Feedback (base p = {base:.2})"),
            x_label: "Number of Agents (n)",
            y_label: "System Accuracy",
            series: feedback,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reference_panels() {
        let chart = chart_data(&ChartConfig::default()).unwrap();
        assert_eq!(chart.decay.series.len(), 4);
        assert_eq!(chart.decay.series[0].label, "p = 0.85");

        let labels: Vec<&str> = chart.feedback.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "No feedback (p = 0.90)",
                "With feedback: p = 0.93 (+0.03)",
                "With feedback: p = 0.95 (+0.05)",
                "With feedback: p = 0.97 (+0.07)",
                "With feedback: p = 0.99 (+0.09)",
            ]
        );
        assert!(chart.feedback.series[0].baseline);
        assert!(chart
            .feedback
            .series
            .iter()
            .all(|s| s.points.len() == 10));
    }

    #[test]
    fn writes_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.json");
        chart_data(&ChartConfig::default())
            .unwrap()
            .write_json(&path)
            .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["feedback"]["series"].as_array().unwrap().len(), 5);
        assert_eq!(value["decay"]["x_label"], "Number of Agents (n)");
    }

    #[test]
    fn write_to_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("chart.json");
        let err = chart_data(&ChartConfig::default())
            .unwrap()
            .write_json(&path)
            .unwrap_err();
        assert!(matches!(err, ScenarioError::Io { .. }));
    }
}
