//! Scenario configuration
//!
//! All grid parameters of an analysis run. Every field has a default equal to
//! the reference analysis, so an empty TOML file is a valid scenario and a
//! partial file only overrides what it names.
//!
//! ```toml
//! [paper_example]
//! agent_count = 5
//! base_accuracy = 0.90
//! improved_accuracy = 0.95
//!
//! [decay]
//! accuracies = [0.90, 0.95, 0.99]
//! max_agents = 10
//!
//! [[mechanisms.mechanisms]]
//! kind = "retry"
//! attempts = 2
//! ```

#![allow(missing_docs)]

use crate::error::{ScenarioError, ScenarioResult};
use apa_model::{improvement_gain, MechanismRegistry, MechanismSpec, PipelineConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Full analysis configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Single base-to-improved comparison
    pub paper_example: PaperExampleConfig,
    /// Decay table grid
    pub decay: DecayConfig,
    /// Sensitivity table grid
    pub sensitivity: SensitivityConfig,
    /// Fewer versus better agents
    pub depth_tradeoff: DepthTradeoffConfig,
    /// Feedback mechanism comparison
    pub mechanisms: MechanismsConfig,
    /// Chart series
    pub chart: ChartConfig,
}

/// Base-to-improved comparison at one depth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaperExampleConfig {
    pub agent_count: i32,
    pub base_accuracy: f64,
    pub improved_accuracy: f64,
}

impl Default for PaperExampleConfig {
    fn default() -> Self {
        Self {
            agent_count: 5,
            base_accuracy: 0.90,
            improved_accuracy: 0.95,
        }
    }
}

/// Accuracies and depth range of the decay table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecayConfig {
    pub accuracies: Vec<f64>,
    pub max_agents: i32,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            accuracies: vec![0.90, 0.95, 0.99],
            max_agents: 10,
        }
    }
}

/// Pipeline and accuracy gains of the sensitivity table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SensitivityConfig {
    pub agent_count: i32,
    pub base_accuracy: f64,
    pub deltas: Vec<f64>,
}

impl Default for SensitivityConfig {
    fn default() -> Self {
        Self {
            agent_count: 5,
            base_accuracy: 0.90,
            deltas: vec![0.01, 0.02, 0.03, 0.05, 0.10],
        }
    }
}

/// Baseline pipeline and the two alternatives it is compared with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DepthTradeoffConfig {
    pub agent_count: i32,
    pub base_accuracy: f64,
    pub reduced_agent_count: i32,
    pub improved_accuracy: f64,
}

impl Default for DepthTradeoffConfig {
    fn default() -> Self {
        Self {
            agent_count: 10,
            base_accuracy: 0.90,
            reduced_agent_count: 5,
            improved_accuracy: 0.95,
        }
    }
}

/// Pipeline and mechanisms of the feedback comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MechanismsConfig {
    pub agent_count: i32,
    pub base_accuracy: f64,
    pub mechanisms: Vec<MechanismSpec>,
}

impl Default for MechanismsConfig {
    fn default() -> Self {
        Self {
            agent_count: 5,
            base_accuracy: 0.90,
            mechanisms: MechanismSpec::defaults(),
        }
    }
}

impl MechanismsConfig {
    /// Instantiate the configured mechanisms
    ///
    /// # Errors
    /// `InvalidSection` if a mechanism has out-of-range parameters
    pub fn registry(&self) -> ScenarioResult<MechanismRegistry> {
        MechanismRegistry::from_specs(&self.mechanisms)
            .map_err(ScenarioError::section("mechanisms"))
    }
}

/// Series exported for the chart renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    pub max_agents: i32,
    pub decay_accuracies: Vec<f64>,
    pub feedback_base_accuracy: f64,
    pub feedback_deltas: Vec<f64>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            max_agents: 10,
            decay_accuracies: vec![0.85, 0.90, 0.95, 0.99],
            feedback_base_accuracy: 0.90,
            feedback_deltas: vec![0.03, 0.05, 0.07, 0.09],
        }
    }
}

impl ScenarioConfig {
    /// Reference configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML scenario
    ///
    /// # Errors
    /// `Parse` for malformed TOML or unknown keys, `InvalidSection` for
    /// out-of-range values
    pub fn from_toml_str(source: &str) -> ScenarioResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML scenario file
    ///
    /// # Errors
    /// `Io` if the file cannot be read, otherwise as [`Self::from_toml_str`]
    pub fn load(path: impl AsRef<Path>) -> ScenarioResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded scenario config");
        Self::from_toml_str(&source)
    }

    /// Render as TOML
    ///
    /// # Errors
    /// `SerializeConfig` if TOML serialization fails
    pub fn to_toml_string(&self) -> ScenarioResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every section against the model's parameter domains
    ///
    /// # Errors
    /// `InvalidSection` naming the first offending section
    pub fn validate(&self) -> ScenarioResult<()> {
        // The example reports a relative gain, so its baseline must be positive.
        let ex = &self.paper_example;
        improvement_gain(ex.base_accuracy, ex.improved_accuracy, ex.agent_count)
            .map_err(ScenarioError::section("paper_example"))?;

        for &p in &self.decay.accuracies {
            PipelineConfig::new(self.decay.max_agents, p)
                .map_err(ScenarioError::section("decay"))?;
        }

        let s = &self.sensitivity;
        PipelineConfig::new(s.agent_count, s.base_accuracy)
            .map_err(ScenarioError::section("sensitivity"))?;
        for &delta in &s.deltas {
            PipelineConfig::new(s.agent_count, s.base_accuracy + delta)
                .map_err(ScenarioError::section("sensitivity"))?;
        }

        let t = &self.depth_tradeoff;
        PipelineConfig::new(t.agent_count, t.base_accuracy)
            .and_then(|_| PipelineConfig::new(t.reduced_agent_count, t.base_accuracy))
            .and_then(|_| PipelineConfig::new(t.agent_count, t.improved_accuracy))
            .map_err(ScenarioError::section("depth_tradeoff"))?;

        let m = &self.mechanisms;
        PipelineConfig::new(m.agent_count, m.base_accuracy)
            .map_err(ScenarioError::section("mechanisms"))?;
        m.registry()?;

        let c = &self.chart;
        for &p in &c.decay_accuracies {
            PipelineConfig::new(c.max_agents, p).map_err(ScenarioError::section("chart"))?;
        }
        PipelineConfig::new(c.max_agents, c.feedback_base_accuracy)
            .map_err(ScenarioError::section("chart"))?;
        for &delta in &c.feedback_deltas {
            PipelineConfig::new(c.max_agents, c.feedback_base_accuracy + delta)
                .map_err(ScenarioError::section("chart"))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_is_reference_scenario() {
        let config = ScenarioConfig::from_toml_str("").unwrap();
        assert_eq!(config, ScenarioConfig::new());
    }

    #[test]
    fn partial_override() {
        let config = ScenarioConfig::from_toml_str(
            r#"
            [decay]
            accuracies = [0.8]
            "#,
        )
        .unwrap();
        assert_eq!(config.decay.accuracies, vec![0.8]);
        assert_eq!(config.decay.max_agents, 10);
        assert_eq!(config.sensitivity, SensitivityConfig::default());
    }

    #[test]
    fn mechanisms_from_toml() {
        let config = ScenarioConfig::from_toml_str(
            r#"
            [mechanisms]
            agent_count = 8

            [[mechanisms.mechanisms]]
            kind = "ensemble"
            members = 5

            [[mechanisms.mechanisms]]
            kind = "verification"
            verifier_accuracy = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.mechanisms.agent_count, 8);
        assert_eq!(
            config.mechanisms.registry().unwrap().labels(),
            vec!["Ensemble (5)", "Verification"]
        );
    }

    #[test]
    fn rejects_out_of_range_values() {
        let err = ScenarioConfig::from_toml_str("[decay]\naccuracies = [1.5]\n").unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::InvalidSection {
                section: "decay",
                ..
            }
        ));

        let err = ScenarioConfig::from_toml_str("[sensitivity]\ndeltas = [0.2]\n").unwrap_err();
        assert!(err.is_invalid_parameter());

        let err = ScenarioConfig::from_toml_str("[depth_tradeoff]\nreduced_agent_count = -2\n")
            .unwrap_err();
        assert!(err.to_string().contains("depth_tradeoff"));

        let err = ScenarioConfig::from_toml_str(
            "[[mechanisms.mechanisms]]\nkind = \"retry\"\nattempts = 0\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("attempts"));
    }

    #[test]
    fn zero_baseline_example_names_its_section() {
        let err =
            ScenarioConfig::from_toml_str("[paper_example]\nbase_accuracy = 0.0\n").unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::InvalidSection {
                section: "paper_example",
                ..
            }
        ));
        assert!(err.is_invalid_parameter());

        // n = 0 keeps the baseline at 1
        assert!(ScenarioConfig::from_toml_str(
            "[paper_example]\nagent_count = 0\nbase_accuracy = 0.0\n"
        )
        .is_ok());
    }

    #[test]
    fn zero_accuracy_sensitivity_is_valid() {
        let config =
            ScenarioConfig::from_toml_str("[sensitivity]\nbase_accuracy = 0.0\n").unwrap();
        assert_eq!(config.sensitivity.base_accuracy, 0.0);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = ScenarioConfig::from_toml_str("[decay]\nmax_agent = 3\n").unwrap_err();
        assert!(matches!(err, ScenarioError::Parse(_)));
    }

    #[test]
    fn toml_round_trip() {
        let config = ScenarioConfig::new();
        let text = config.to_toml_string().unwrap();
        assert_eq!(ScenarioConfig::from_toml_str(&text).unwrap(), config);
    }
}
