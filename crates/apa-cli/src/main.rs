//! `apa`: accuracy analysis of sequential agent pipelines

use apa_cli::{build_cli, logging, run};

fn main() {
    let matches = build_cli().get_matches();
    logging::init(matches.get_count("verbose"), matches.get_flag("log-json"));

    match run(&matches) {
        Ok(out) => print!("{out}"),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    }
}
