//! Describe subcommand - descriptive statistics and outlier flags

use std::path::Path;

use anyhow::Result;

use crate::pipeline::{describe, detect_outliers, load_table};
use crate::report::display_descriptive_stats;
use crate::utils::{create_spinner, finish_with_success, print_count, print_info, print_warning};

pub fn run_describe(input: &Path, columns: &[String], infer_schema_length: usize) -> Result<()> {
    let spinner = create_spinner("Loading dataset...");
    let df = load_table(input, infer_schema_length)?;
    finish_with_success(&spinner, "Dataset loaded");

    let selection = (!columns.is_empty()).then_some(columns);
    let mut stats = describe(&df, selection)?;
    if stats.is_empty() {
        print_warning("No numerical column with observed values to describe");
        return Ok(());
    }

    let outliers = detect_outliers(&mut stats);
    display_descriptive_stats(&stats);

    println!();
    print_count(
        "column(s) with high outliers",
        outliers.len(),
        Some("(max above Q3 + 1.5 x IQR)"),
    );
    if !outliers.is_empty() {
        print_info(
            &outliers
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        );
    }
    Ok(())
}
