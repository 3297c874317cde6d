//! CLI module - argument parsing and subcommand runners

mod args;
pub mod analyze;
pub mod describe;
pub mod fetch;
pub mod plot;

pub use args::{default_fetch_output, Cli, Commands, PlotKind};
