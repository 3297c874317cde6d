//! Plot subcommand - terminal charts

use std::path::Path;

use anyhow::{Context, Result};

use super::PlotKind;
use crate::pipeline::{category_counts, dtype_distribution, load_table, skewness};
use crate::report::{print_counts_chart, print_dtype_chart, print_skewness_chart};
use crate::utils::print_warning;

pub fn run_plot(
    kind: PlotKind,
    input: &Path,
    column: Option<&str>,
    top: usize,
    infer_schema_length: usize,
) -> Result<()> {
    let df = load_table(input, infer_schema_length)?;

    match kind {
        PlotKind::Dtypes => print_dtype_chart(&dtype_distribution(&df)),
        PlotKind::Skewness => {
            let values = skewness(&df, None)?;
            if values.is_empty() {
                print_warning("No numerical column with enough variation for skewness");
            } else {
                print_skewness_chart(&values);
            }
        }
        PlotKind::Counts => {
            let column = column.context("--column is required for the counts chart")?;
            print_counts_chart(column, &category_counts(&df, column, top)?);
        }
    }
    Ok(())
}
