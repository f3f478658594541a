//! APA Command Line
//!
//! The `apa` binary wraps the scenario runner in subcommands. The command
//! definition and handlers live in this library so they can be driven from
//! tests without spawning a process.
//!
//! # Example
//!
//! ```rust
//! let matches = apa_cli::cli::build_cli()
//!     .try_get_matches_from(["apa", "compare", "-n", "5"])?;
//! let out = apa_cli::commands::run(&matches)?;
//! assert!(out.contains("Improvement: 31.04%"));
//! # Ok::<(), anyhow::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cli;
pub mod commands;
pub mod logging;

pub use cli::build_cli;
pub use commands::run;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
