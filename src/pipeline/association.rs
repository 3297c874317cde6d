//! Association between a target partition and the other columns
//!
//! The tester picks a test per column pairing:
//! - categorical column vs numeric outcome: one-way ANOVA
//! - categorical column vs target partition: chi-square test of independence
//! - numerical column vs target partition: Welch's t-test
//!
//! Each call returns one [`ColumnTest`] per column. Degenerate columns come
//! back as [`TestOutcome::Skipped`] and never abort the batch. Callers that
//! want the old accumulate-across-calls behaviour feed the returned tests into
//! an [`AssociationResults`].

use std::borrow::Cow;
use std::collections::HashMap;

use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use super::columns::{
    category_values, classify_columns, numeric_values, require_column, ColumnSet,
};
use super::stats::{chi_square_independence, one_way_anova, welch_t_test, SkipReason};
use super::target::{partition_target, PartitionMode};
use crate::error::{MistyError, MistyResult};

/// Default significance level
pub const DEFAULT_P_THRESHOLD: f64 = 0.05;

/// Statistical test applied to a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TestMethod {
    Anova,
    ChiSquare,
    WelchT,
}

impl std::fmt::Display for TestMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestMethod::Anova => write!(f, "ANOVA"),
            TestMethod::ChiSquare => write!(f, "Chi-square"),
            TestMethod::WelchT => write!(f, "Welch t"),
        }
    }
}

/// Result of testing one column
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TestOutcome {
    Tested { p_value: f64 },
    Skipped { reason: SkipReason },
}

/// One column's test, tested or skipped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnTest {
    pub feature: String,
    pub method: TestMethod,
    pub outcome: TestOutcome,
}

impl ColumnTest {
    fn new(feature: &str, method: TestMethod, result: Result<f64, SkipReason>) -> Self {
        let outcome = match result {
            Ok(p_value) => TestOutcome::Tested { p_value },
            Err(reason) => {
                debug!(feature, %method, %reason, "column skipped");
                TestOutcome::Skipped { reason }
            }
        };
        Self {
            feature: feature.to_string(),
            method,
            outcome,
        }
    }

    pub fn p_value(&self) -> Option<f64> {
        match self.outcome {
            TestOutcome::Tested { p_value } => Some(p_value),
            TestOutcome::Skipped { .. } => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, TestOutcome::Skipped { .. })
    }
}

/// A tested feature and its p-value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociationResult {
    pub feature: String,
    pub method: TestMethod,
    pub p_value: f64,
}

/// What the ANOVA groups by each categorical column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A numeric column of the table, e.g. `price`
    Column(String),
    /// The target partition as 0/1
    Partition,
}

/// Tester configuration
#[derive(Debug, Clone, Default)]
pub struct TesterConfig {
    /// Numeric columns left out of the t-tests (ids, coordinates, ...)
    pub excluded_numerical: Vec<String>,
    /// How the target is turned into a partition
    pub mode: PartitionMode,
}

/// Tests a table's columns against a binary partition of a target column.
///
/// Holds its own copy of the table; the caller's frame is never modified.
#[derive(Debug, Clone)]
pub struct AssociationTester {
    data: DataFrame,
    target: String,
    mode: PartitionMode,
    columns: ColumnSet,
    partition: Vec<bool>,
}

impl AssociationTester {
    /// Classify the columns and compute the partition for `target`.
    pub fn new(df: &DataFrame, target: &str, config: TesterConfig) -> MistyResult<Self> {
        require_column(df, target)?;
        let columns = classify_columns(df, target, &config.excluded_numerical);
        let partition = partition_target(df, target, config.mode)?;

        debug!(
            target_column = target,
            mode = %config.mode,
            categorical = columns.categorical.len(),
            numerical = columns.numerical.len(),
            "association tester ready"
        );

        Ok(Self {
            data: df.clone(),
            target: target.to_string(),
            mode: config.mode,
            columns,
            partition,
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn mode(&self) -> PartitionMode {
        self.mode
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    /// Partition for `target`, or for the tester's own target when `None`.
    ///
    /// Another target is partitioned on demand with the tester's mode.
    pub fn partition_for(&self, target: Option<&str>) -> MistyResult<Cow<'_, [bool]>> {
        match target {
            Some(other) if other != self.target => {
                Ok(Cow::Owned(partition_target(&self.data, other, self.mode)?))
            }
            _ => Ok(Cow::Borrowed(&self.partition)),
        }
    }

    /// One-way ANOVA of `outcome` grouped by each categorical column.
    ///
    /// `columns` restricts the run to the given names; they must exist.
    pub fn categorical_vs_outcome(
        &self,
        outcome: &Outcome,
        target: Option<&str>,
        columns: Option<&[String]>,
    ) -> MistyResult<Vec<ColumnTest>> {
        let values = self.outcome_values(outcome, target)?;

        let names: &[String] = match columns {
            Some(names) => {
                for name in names {
                    require_column(&self.data, name)?;
                }
                names
            }
            None => &self.columns.categorical,
        };

        names
            .iter()
            .map(|name| {
                let categories = category_values(require_column(&self.data, name)?)?;
                Ok(anova_column(name, &categories, &values))
            })
            .collect()
    }

    /// Chi-square test of each categorical column against the partition.
    pub fn categorical_vs_categorical(&self, target: Option<&str>) -> MistyResult<Vec<ColumnTest>> {
        let partition = self.partition_for(target)?;

        self.columns
            .categorical
            .iter()
            .map(|name| {
                let categories = category_values(require_column(&self.data, name)?)?;
                Ok(chi_square_column(name, &categories, &partition))
            })
            .collect()
    }

    /// Welch's t-test of each numerical column split by the partition.
    pub fn numerical_vs_target(&self, target: Option<&str>) -> MistyResult<Vec<ColumnTest>> {
        let partition = self.partition_for(target)?;

        self.columns
            .numerical
            .iter()
            .filter(|name| target.map_or(true, |t| t != name.as_str()))
            .map(|name| {
                let values = numeric_values(require_column(&self.data, name)?)?;
                Ok(welch_column(name, &values, &partition))
            })
            .collect()
    }

    fn outcome_values(&self, outcome: &Outcome, target: Option<&str>) -> MistyResult<Vec<Option<f64>>> {
        match outcome {
            Outcome::Partition => Ok(self
                .partition_for(target)?
                .iter()
                .map(|&v| Some(if v { 1.0 } else { 0.0 }))
                .collect()),
            Outcome::Column(name) => {
                let col = require_column(&self.data, name)?;
                if !col.dtype().is_primitive_numeric() {
                    return Err(MistyError::NonNumericOutcome {
                        name: name.clone(),
                        dtype: col.dtype().to_string(),
                    });
                }
                numeric_values(col)
            }
        }
    }
}

/// ANOVA of `values` grouped by `categories`, groups in first-seen order.
pub fn anova_column(name: &str, categories: &[Option<String>], values: &[Option<f64>]) -> ColumnTest {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<f64>> = Vec::new();

    for (category, value) in categories.iter().zip(values) {
        let (Some(category), Some(value)) = (category, value) else {
            continue;
        };
        let slot = *index.entry(category.as_str()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(*value);
    }

    let result = one_way_anova(&groups).map(|r| r.p_value);
    ColumnTest::new(name, TestMethod::Anova, result)
}

/// Chi-square test of `categories` against a boolean partition.
///
/// Rows with a missing category are left out of the contingency table.
pub fn chi_square_column(name: &str, categories: &[Option<String>], partition: &[bool]) -> ColumnTest {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<[f64; 2]> = Vec::new();

    for (category, &class) in categories.iter().zip(partition) {
        let Some(category) = category else {
            continue;
        };
        let slot = *index.entry(category.as_str()).or_insert_with(|| {
            counts.push([0.0; 2]);
            counts.len() - 1
        });
        counts[slot][usize::from(class)] += 1.0;
    }

    let rows = counts.len();
    let present: Vec<usize> = (0..2)
        .filter(|&j| counts.iter().any(|row| row[j] > 0.0))
        .collect();

    let result = if rows < 2 || present.len() != 2 {
        Err(SkipReason::ContingencyShape {
            rows,
            classes: present.len(),
        })
    } else {
        let table: Vec<Vec<f64>> = counts.iter().map(|row| row.to_vec()).collect();
        chi_square_independence(&table).map(|r| r.p_value)
    };

    ColumnTest::new(name, TestMethod::ChiSquare, result)
}

/// Welch's t-test of `values` where the partition is true vs false.
pub fn welch_column(name: &str, values: &[Option<f64>], partition: &[bool]) -> ColumnTest {
    let mut positive = Vec::new();
    let mut negative = Vec::new();

    for (value, &class) in values.iter().zip(partition) {
        if let Some(v) = value {
            if class {
                positive.push(*v);
            } else {
                negative.push(*v);
            }
        }
    }

    let result = welch_t_test(&positive, &negative).map(|r| r.p_value);
    ColumnTest::new(name, TestMethod::WelchT, result)
}

/// Append-only collection of tested features
#[derive(Debug, Clone, Default)]
pub struct AssociationResults {
    records: Vec<AssociationResult>,
}

impl AssociationResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the tested outcomes; skipped columns are not recorded.
    ///
    /// Returns how many records were added.
    pub fn extend<I>(&mut self, tests: I) -> usize
    where
        I: IntoIterator<Item = ColumnTest>,
    {
        let before = self.records.len();
        self.records.extend(tests.into_iter().filter_map(|t| {
            t.p_value().map(|p_value| AssociationResult {
                feature: t.feature,
                method: t.method,
                p_value,
            })
        }));
        self.records.len() - before
    }

    pub fn push(&mut self, record: AssociationResult) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[AssociationResult] {
        &self.records
    }

    /// Sort by p-value and measure the share below `p_threshold`.
    ///
    /// Read-only: calling it twice gives the same report.
    pub fn aggregate(&self, p_threshold: f64) -> AggregateReport {
        let mut sorted = self.records.clone();
        sorted.sort_by(|a, b| a.p_value.total_cmp(&b.p_value));

        let significant = sorted.iter().filter(|r| r.p_value < p_threshold).count();
        let fraction_significant = if sorted.is_empty() {
            0.0
        } else {
            significant as f64 / sorted.len() as f64
        };

        AggregateReport {
            sorted,
            fraction_significant,
            p_threshold,
        }
    }
}

/// Sorted results with the share of significant features
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateReport {
    pub sorted: Vec<AssociationResult>,
    pub fraction_significant: f64,
    pub p_threshold: f64,
}

impl AggregateReport {
    pub fn significant_count(&self) -> usize {
        self.sorted
            .iter()
            .filter(|r| r.p_value < self.p_threshold)
            .count()
    }

    pub fn summary_line(&self) -> String {
        format!(
            "missingness dependent on {:.1}% of attributes",
            self.fraction_significant * 100.0
        )
    }
}

/// One row of [`association_with_missing_target`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingAssociation {
    pub feature: String,
    pub method: TestMethod,
    pub p_value: f64,
    /// `p_value < p_threshold`
    pub associated: bool,
}

/// Test whether missingness of `target` is associated with each column.
///
/// Categorical columns get a chi-square test and numerical columns (minus the
/// target) a Welch t-test. Each block is sorted by p-value on its own, then
/// categorical results come first. Skipped columns are left out.
pub fn association_with_missing_target(
    df: &DataFrame,
    target: &str,
    p_threshold: f64,
) -> MistyResult<Vec<MissingAssociation>> {
    let partition = partition_target(df, target, PartitionMode::Missing)?;
    let columns = classify_columns(df, target, &[]);

    let mut categorical = Vec::with_capacity(columns.categorical.len());
    for name in &columns.categorical {
        let categories = category_values(require_column(df, name)?)?;
        categorical.push(chi_square_column(name, &categories, &partition));
    }

    let mut numerical = Vec::with_capacity(columns.numerical.len());
    for name in &columns.numerical {
        let values = numeric_values(require_column(df, name)?)?;
        numerical.push(welch_column(name, &values, &partition));
    }

    let mut rows = Vec::new();
    for block in [categorical, numerical] {
        let mut tested: Vec<MissingAssociation> = block
            .into_iter()
            .filter_map(|t| {
                t.p_value().map(|p_value| MissingAssociation {
                    feature: t.feature,
                    method: t.method,
                    p_value,
                    associated: p_value < p_threshold,
                })
            })
            .collect();
        tested.sort_by(|a, b| a.p_value.total_cmp(&b.p_value));
        rows.extend(tested);
    }

    Ok(rows)
}
