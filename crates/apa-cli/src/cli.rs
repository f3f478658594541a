//! Command line definition

use clap::{value_parser, Arg, ArgAction, Command};

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .short('c')
        .value_name("FILE")
        .help("TOML scenario file (defaults to the reference scenario)")
}

fn agents_arg(default: Option<&'static str>) -> Arg {
    let arg = Arg::new("agents")
        .long("agents")
        .short('n')
        .value_parser(value_parser!(i32))
        .allow_negative_numbers(true)
        .help("Number of agents in the pipeline");
    match default {
        Some(value) => arg.default_value(value),
        None => arg,
    }
}

fn probability_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_parser(value_parser!(f64))
        .allow_negative_numbers(true)
        .help(help)
}

fn list_arg(name: &'static str, default: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_delimiter(',')
        .num_args(1..)
        .default_value(default)
        .value_parser(value_parser!(f64))
        .allow_negative_numbers(true)
        .help(help)
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON")
}

/// Build the `apa` command
#[must_use]
pub fn build_cli() -> Command {
    Command::new("apa")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Accuracy decay of sequential multi-agent pipelines and feedback mitigation")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (RUST_LOG takes precedence)"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines on stderr"),
        )
        .subcommand(
            Command::new("report")
                .about("Run the full analysis")
                .arg(config_arg())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("decay")
                .about("System accuracy over pipeline depth")
                .arg(list_arg(
                    "accuracies",
                    "0.9,0.95,0.99",
                    "Comma separated per-agent accuracies",
                ))
                .arg(
                    Arg::new("max-agents")
                        .long("max-agents")
                        .default_value("10")
                        .value_parser(value_parser!(i32))
                        .allow_negative_numbers(true)
                        .help("Deepest pipeline to tabulate"),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("compare")
                .about("Baseline versus improved per-agent accuracy")
                .arg(agents_arg(Some("5")))
                .arg(
                    probability_arg("baseline", "Per-agent accuracy without feedback")
                        .default_value("0.90"),
                )
                .arg(
                    probability_arg("improved", "Per-agent accuracy with feedback")
                        .default_value("0.95"),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("sensitivity")
                .about("Linear versus exact gain for a list of accuracy deltas")
                .arg(agents_arg(Some("5")))
                .arg(probability_arg("accuracy", "Per-agent accuracy").default_value("0.90"))
                .arg(list_arg(
                    "deltas",
                    "0.01,0.02,0.03,0.05,0.10",
                    "Comma separated accuracy gains",
                ))
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("tradeoff")
                .about("Fewer agents versus better agents")
                .arg(agents_arg(Some("10")))
                .arg(probability_arg("accuracy", "Per-agent accuracy").default_value("0.90"))
                .arg(
                    Arg::new("reduced-agents")
                        .long("reduced-agents")
                        .default_value("5")
                        .value_parser(value_parser!(i32))
                        .allow_negative_numbers(true)
                        .help("Depth of the shortened pipeline"),
                )
                .arg(
                    probability_arg("improved", "Per-agent accuracy of the better agents")
                        .default_value("0.95"),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("mechanisms")
                .about("Compare feedback mechanisms on one pipeline")
                .arg(config_arg())
                .arg(agents_arg(None))
                .arg(probability_arg("accuracy", "Per-agent accuracy"))
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("chart")
                .about("Export chart series as JSON")
                .arg(config_arg())
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_name("FILE")
                        .help("Write to FILE instead of stdout"),
                ),
        )
        .subcommand(Command::new("config").about("Print the reference scenario as TOML"))
}
