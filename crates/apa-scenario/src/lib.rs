//! APA Scenario Runner
//!
//! Tabulates the accuracy model over parameter grids for reporting and
//! plotting.
//!
//! # Core Concepts
//!
//! - [`decay_series`]: system accuracy over depth for several accuracies
//! - [`feedback_comparison`]: baseline vs improved accuracy at one depth
//! - [`strategy_table`]: linear vs exact gain for a list of accuracy deltas
//! - [`depth_tradeoff`]: fewer agents vs better agents
//! - [`mechanism_comparison`]: each feedback mechanism on the same pipeline
//! - [`ScenarioConfig`]: every grid parameter, loadable from TOML
//! - [`run_analysis`]: all of the above as one [`AnalysisReport`]
//! - [`chart_data`]: labelled series for an external chart renderer
//!
//! # Example
//!
//! ```rust
//! use apa_scenario::{run_analysis, ScenarioConfig};
//!
//! let report = run_analysis(&ScenarioConfig::new())?;
//! println!("{}", report.render_text());
//! # Ok::<(), apa_scenario::ScenarioError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod chart;
pub mod config;
pub mod error;
pub mod report;
pub mod runner;

// Re-exports
pub use chart::{chart_data, ChartData, ChartPanel, ChartSeries};
pub use config::{
    ChartConfig, DecayConfig, DepthTradeoffConfig, MechanismsConfig, PaperExampleConfig,
    ScenarioConfig, SensitivityConfig,
};
pub use error::{ScenarioError, ScenarioResult};
pub use report::{run_analysis, AnalysisReport, SensitivityTable};
pub use runner::{
    decay_points, decay_series, depth_tradeoff, feedback_comparison, feedback_curves,
    mechanism_comparison, strategy_table, DecayPoint, DecaySeries, DepthTradeoff,
    FeedbackComparison, FeedbackCurve, FeedbackCurves, MechanismComparison, MechanismRow,
    StrategyRow, TradeoffRow,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
