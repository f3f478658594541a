//! Error types for the scenario runner

use apa_model::ModelError;
use std::path::PathBuf;

/// Scenario runner error
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// A model operation rejected its parameters
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A configuration section holds out-of-range values
    #[error("invalid `{section}` section: {source}")]
    InvalidSection {
        /// Section name as written in the scenario file
        section: &'static str,
        /// Underlying validation failure
        #[source]
        source: ModelError,
    },

    /// Reading or writing a file failed
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Scenario file is not valid TOML for [`ScenarioConfig`](crate::ScenarioConfig)
    #[error("failed to parse scenario config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Scenario config could not be rendered as TOML
    #[error("failed to serialize scenario config: {0}")]
    SerializeConfig(#[from] toml::ser::Error),

    /// Report or chart data could not be rendered as JSON
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScenarioError {
    /// Check if the error stems from invalid numeric parameters
    #[inline]
    #[must_use]
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::Model(_) | Self::InvalidSection { .. })
    }

    /// Attach a config section to a model error
    pub(crate) fn section(section: &'static str) -> impl FnOnce(ModelError) -> Self {
        move |source| Self::InvalidSection { section, source }
    }
}

/// Result alias for the scenario runner
pub type ScenarioResult<T> = Result<T, ScenarioError>;
