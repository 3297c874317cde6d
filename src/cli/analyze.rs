//! Default pipeline: missingness association analysis

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use console::style;

use super::Cli;
use crate::pipeline::{
    association_with_missing_target, estimated_size_mb, load_table, partition_counts,
    AssociationTester, Outcome, TesterConfig,
};
use crate::report::{
    display_missing_associations, export_association_results, export_missing_associations,
    AnalysisSummary, ExportParams,
};
use crate::utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_count, print_info, print_step_header, print_success, print_warning,
};

/// Run the association analysis described by the top-level arguments
pub fn run_analyze(cli: &Cli, input: &Path) -> Result<()> {
    let mode = cli.partition_mode();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(
        input,
        &cli.target,
        &mode.to_string(),
        cli.p_threshold,
        cli.outcome.as_deref(),
    );

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let load_start = Instant::now();
    let spinner = create_spinner("Loading dataset...");
    let df = load_table(input, cli.infer_schema_length)?;
    finish_with_success(&spinner, "Dataset loaded");
    let load_elapsed = load_start.elapsed();

    let (rows, cols) = df.shape();
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", estimated_size_mb(&df));

    if cli.standalone {
        print_step_header(2, "Missingness Association");
        let spinner = create_spinner("Running chi-square and t-tests...");
        let associations = association_with_missing_target(&df, &cli.target, cli.p_threshold)?;
        finish_with_success(&spinner, "Tests complete");

        display_missing_associations(&associations, cli.p_threshold);

        if let Some(path) = &cli.export {
            let input_file = input.display().to_string();
            let params = export_params(cli, &input_file);
            export_missing_associations(&associations, path, &params)?;
            print_success(&format!("Exported results to {}", path.display()));
        }

        print_completion();
        return Ok(());
    }

    // Step 2: Classify columns and partition the target
    print_step_header(2, "Classify Columns");
    let config = TesterConfig {
        excluded_numerical: cli.exclude_numerical.clone(),
        mode,
    };
    let tester = AssociationTester::new(&df, &cli.target, config)?;

    print_count(
        "categorical column(s)",
        tester.columns().categorical.len(),
        None,
    );
    print_count(
        "numerical column(s)",
        tester.columns().numerical.len(),
        Some(format!("(excluding '{}')", tester.target()).as_str()),
    );
    if tester.columns().is_empty() {
        print_warning("No categorical or numerical column to test against the target");
    }

    let partition = tester.partition_for(None)?;
    let (positives, negatives) = partition_counts(&partition);
    print_info(&format!(
        "Target split: {} {} / {} other",
        positives,
        if cli.for_value { "true" } else { "missing" },
        negatives
    ));
    if positives == 0 || negatives == 0 {
        print_warning("One side of the target partition is empty; every test will be skipped");
    }

    // Step 3: Pairwise tests
    print_step_header(3, "Association Tests");
    let test_start = Instant::now();
    let outcome = match &cli.outcome {
        Some(name) => Outcome::Column(name.clone()),
        None => Outcome::Partition,
    };

    let spinner = create_spinner("Running ANOVA, chi-square and Welch t-tests...");
    let mut tests = tester.categorical_vs_outcome(&outcome, None, None)?;
    tests.extend(tester.categorical_vs_categorical(None)?);
    tests.extend(tester.numerical_vs_target(None)?);
    finish_with_success(&spinner, &format!("Ran {} column test(s)", tests.len()));

    let mut summary = AnalysisSummary::new(&cli.target, mode, tests, cli.p_threshold);
    summary.set_load_time(load_elapsed);
    summary.set_test_time(test_start.elapsed());
    summary.display();

    if let Some(path) = &cli.export {
        let input_file = input.display().to_string();
        let params = export_params(cli, &input_file);
        export_association_results(&summary, path, &params)?;
        println!();
        print_success(&format!("Exported results to {}", path.display()));
    }

    print_completion();
    Ok(())
}

fn export_params<'a>(cli: &'a Cli, input_file: &'a str) -> ExportParams<'a> {
    ExportParams {
        input_file,
        target_column: &cli.target,
        mode: cli.partition_mode(),
        p_threshold: cli.p_threshold,
        outcome_column: cli.outcome.as_deref(),
    }
}
