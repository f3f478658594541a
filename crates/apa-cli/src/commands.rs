//! Subcommand handlers
//!
//! Each handler returns the text to print so it can be exercised without a
//! process boundary.

use anyhow::{Context, Result};
use apa_scenario::report::{
    write_decay_table, write_depth_tradeoff, write_mechanisms, write_sensitivity,
};
use apa_scenario::{
    chart_data, decay_series, depth_tradeoff, feedback_comparison, mechanism_comparison,
    run_analysis, strategy_table, ScenarioConfig, SensitivityTable,
};
use clap::ArgMatches;
use std::fmt::Write as _;
use std::path::Path;

/// Dispatch a parsed command line and return its stdout
///
/// # Errors
/// Invalid parameters, unreadable config files, or failed writes
pub fn run(matches: &ArgMatches) -> Result<String> {
    if let Some(name) = matches.subcommand_name() {
        tracing::debug!(command = name, "dispatching");
    }
    match matches.subcommand() {
        Some(("report", args)) => report(args),
        Some(("decay", args)) => decay(args),
        Some(("compare", args)) => compare(args),
        Some(("sensitivity", args)) => sensitivity(args),
        Some(("tradeoff", args)) => tradeoff(args),
        Some(("mechanisms", args)) => mechanisms(args),
        Some(("chart", args)) => chart(args),
        Some(("config", _)) => Ok(ScenarioConfig::new().to_toml_string()?),
        Some((other, _)) => anyhow::bail!("unknown subcommand `{other}`"),
        None => anyhow::bail!("no subcommand given"),
    }
}

fn load_config(args: &ArgMatches) -> Result<ScenarioConfig> {
    match args.get_one::<String>("config") {
        Some(path) => ScenarioConfig::load(Path::new(path))
            .with_context(|| format!("loading scenario {path}")),
        None => Ok(ScenarioConfig::new()),
    }
}

fn required<'a, T>(args: &'a ArgMatches, name: &str) -> Result<&'a T>
where
    T: Clone + Send + Sync + 'static,
{
    args.get_one::<T>(name)
        .with_context(|| format!("missing --{name}"))
}

fn list(args: &ArgMatches, name: &str) -> Vec<f64> {
    args.get_many::<f64>(name)
        .map(|values| values.copied().collect())
        .unwrap_or_default()
}

fn report(args: &ArgMatches) -> Result<String> {
    let config = load_config(args)?;
    let report = run_analysis(&config).context("running analysis")?;
    if args.get_flag("json") {
        Ok(report.to_json()?)
    } else {
        Ok(report.render_text())
    }
}

fn decay(args: &ArgMatches) -> Result<String> {
    let accuracies = list(args, "accuracies");
    let max_agents = *required::<i32>(args, "max-agents")?;
    let series = decay_series(&accuracies, max_agents).context("computing decay series")?;

    if args.get_flag("json") {
        return Ok(serde_json::to_string_pretty(&series)?);
    }
    let mut out = String::new();
    write_decay_table(&mut out, &series)?;
    Ok(out)
}

fn compare(args: &ArgMatches) -> Result<String> {
    let n = *required::<i32>(args, "agents")?;
    let baseline = *required::<f64>(args, "baseline")?;
    let improved = *required::<f64>(args, "improved")?;
    let cmp = feedback_comparison(n, baseline, improved).context("comparing accuracies")?;

    if args.get_flag("json") {
        return Ok(serde_json::to_string_pretty(&cmp)?);
    }
    let mut out = String::new();
    writeln!(out, "n = {n}")?;
    writeln!(out, "Baseline (p = {baseline:.2}): A = {:.5}", cmp.baseline)?;
    writeln!(out, "Improved (p = {improved:.2}): A = {:.5}", cmp.improved)?;
    writeln!(out, "Improvement: {:.2}%", cmp.improvement_pct)?;
    Ok(out)
}

fn sensitivity(args: &ArgMatches) -> Result<String> {
    let n = *required::<i32>(args, "agents")?;
    let p = *required::<f64>(args, "accuracy")?;
    let deltas = list(args, "deltas");
    let table = SensitivityTable {
        agent_count: n,
        base_accuracy: p,
        rows: strategy_table(n, p, &deltas).context("computing sensitivity table")?,
    };

    if args.get_flag("json") {
        return Ok(serde_json::to_string_pretty(&table)?);
    }
    let mut out = String::new();
    write_sensitivity(&mut out, &table)?;
    Ok(out)
}

fn mechanisms(args: &ArgMatches) -> Result<String> {
    let config = load_config(args)?;
    let section = &config.mechanisms;
    let n = args
        .get_one::<i32>("agents")
        .copied()
        .unwrap_or(section.agent_count);
    let p = args
        .get_one::<f64>("accuracy")
        .copied()
        .unwrap_or(section.base_accuracy);
    let registry = section.registry()?;
    let cmp = mechanism_comparison(n, p, &registry).context("comparing mechanisms")?;

    if args.get_flag("json") {
        return Ok(serde_json::to_string_pretty(&cmp)?);
    }
    let mut out = String::new();
    write_mechanisms(&mut out, &cmp)?;
    Ok(out)
}

fn chart(args: &ArgMatches) -> Result<String> {
    let config = load_config(args)?;
    let data = chart_data(&config.chart).context("computing chart series")?;
    match args.get_one::<String>("output") {
        Some(path) => {
            data.write_json(Path::new(path))?;
            Ok(format!("Saved chart data to {path}\n"))
        }
        None => Ok(data.to_json()?),
    }
}

fn tradeoff(args: &ArgMatches) -> Result<String> {
    let n = *required::<i32>(args, "agents")?;
    let p = *required::<f64>(args, "accuracy")?;
    let reduced = *required::<i32>(args, "reduced-agents")?;
    let improved = *required::<f64>(args, "improved")?;
    let tradeoff = depth_tradeoff(n, p, reduced, improved).context("comparing depths")?;

    if args.get_flag("json") {
        return Ok(serde_json::to_string_pretty(&tradeoff)?);
    }
    let mut out = String::new();
    write_depth_tradeoff(&mut out, &tradeoff)?;
    Ok(out)
}
