//! Association results export functionality

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{AssociationResult, ColumnTest, MissingAssociation, PartitionMode};
use crate::report::AnalysisSummary;

/// Metadata about the analysis run
#[derive(Serialize)]
pub struct AnalysisMetadata {
    /// Timestamp of the analysis (ISO 8601 format)
    pub timestamp: String,
    /// Misty version
    pub misty_version: String,
    /// Input file path
    pub input_file: String,
    /// Target column name
    pub target_column: String,
    /// How the target was partitioned
    pub mode: PartitionMode,
    /// Significance level
    pub p_threshold: f64,
    /// ANOVA outcome column, when one was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome_column: Option<String>,
}

/// Counts over the run
#[derive(Serialize)]
pub struct ExportSummary {
    pub features_tested: usize,
    pub features_skipped: usize,
    pub features_significant: usize,
    pub fraction_significant: f64,
}

/// Complete association export with metadata
#[derive(Serialize)]
pub struct AssociationExport<'a> {
    pub metadata: AnalysisMetadata,
    pub summary: ExportSummary,
    /// Tested features, ascending by p-value
    pub results: &'a [AssociationResult],
    /// Every column test including skips, in run order
    pub tests: &'a [ColumnTest],
}

/// Standalone missingness association export
#[derive(Serialize)]
pub struct MissingAssociationExport<'a> {
    pub metadata: AnalysisMetadata,
    pub features: &'a [MissingAssociation],
}

/// Parameters for the export metadata
pub struct ExportParams<'a> {
    pub input_file: &'a str,
    pub target_column: &'a str,
    pub mode: PartitionMode,
    pub p_threshold: f64,
    pub outcome_column: Option<&'a str>,
}

impl ExportParams<'_> {
    fn metadata(&self) -> AnalysisMetadata {
        AnalysisMetadata {
            timestamp: Utc::now().to_rfc3339(),
            misty_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: self.input_file.to_string(),
            target_column: self.target_column.to_string(),
            mode: self.mode,
            p_threshold: self.p_threshold,
            outcome_column: self.outcome_column.map(|s| s.to_string()),
        }
    }
}

/// Build the JSON document for a tester run
pub fn association_export_json(summary: &AnalysisSummary, params: &ExportParams) -> Result<String> {
    let export = AssociationExport {
        metadata: params.metadata(),
        summary: ExportSummary {
            features_tested: summary.report.sorted.len(),
            features_skipped: summary.skipped().len(),
            features_significant: summary.report.significant_count(),
            fraction_significant: summary.report.fraction_significant,
        },
        results: &summary.report.sorted,
        tests: &summary.tests,
    };

    serde_json::to_string_pretty(&export).context("Failed to serialize association results to JSON")
}

/// Export a tester run to a JSON file
pub fn export_association_results(
    summary: &AnalysisSummary,
    output_path: &Path,
    params: &ExportParams,
) -> Result<()> {
    let json = association_export_json(summary, params)?;
    std::fs::write(output_path, json).with_context(|| {
        format!(
            "Failed to write association results to {}",
            output_path.display()
        )
    })
}

/// Export standalone missingness association rows to a JSON file
pub fn export_missing_associations(
    rows: &[MissingAssociation],
    output_path: &Path,
    params: &ExportParams,
) -> Result<()> {
    let export = MissingAssociationExport {
        metadata: params.metadata(),
        features: rows,
    };

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize missingness associations to JSON")?;

    std::fs::write(output_path, json).with_context(|| {
        format!(
            "Failed to write missingness associations to {}",
            output_path.display()
        )
    })
}
