//! Misty: missing-data association CLI
//!
//! Downloads listings tables, profiles them, and tests whether a target
//! column's missing values depend on the other columns.

use anyhow::Result;
use clap::Parser;

use misty::cli::{self, Cli, Commands};
use misty::utils::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    // Handle subcommands
    if let Some(command) = &cli.command {
        return match command {
            Commands::Fetch {
                city,
                url,
                output,
                print_html,
                infer_schema_length,
            } => cli::fetch::run_fetch(
                city,
                url,
                output.as_deref(),
                *print_html,
                *infer_schema_length,
            ),
            Commands::Describe {
                input,
                columns,
                infer_schema_length,
            } => cli::describe::run_describe(input, columns, *infer_schema_length),
            Commands::Plot {
                kind,
                input,
                column,
                top,
                infer_schema_length,
            } => cli::plot::run_plot(
                *kind,
                input,
                column.as_deref(),
                *top,
                *infer_schema_length,
            ),
        };
    }

    // Main analysis pipeline - require input
    let input = cli.input().ok_or_else(|| {
        anyhow::anyhow!("Input file is required. Use -i/--input to specify a file.")
    })?;

    cli::analyze::run_analyze(&cli, input)
}
