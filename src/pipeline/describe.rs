//! Descriptive statistics and IQR outlier flags for numerical columns

use std::collections::BTreeSet;

use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

use super::columns::{numeric_values, require_column};
use crate::error::MistyResult;

/// Multiplier applied to the IQR for the outlier fences
pub const IQR_FENCE: f64 = 1.5;

/// Summary of one numerical column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two values
    pub std: Option<f64>,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
    pub outlier: bool,
}

impl DescriptiveStats {
    /// Summarize the non-missing values of a column. `None` if there are none.
    pub fn from_values(column: &str, values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let std = (n > 1).then(|| {
            let ss: f64 = sorted.iter().map(|&x| (x - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        });

        Some(Self {
            column: column.to_string(),
            count: n,
            mean,
            std,
            min: sorted[0],
            q1: quantile_sorted(&sorted, 0.25),
            median: quantile_sorted(&sorted, 0.5),
            q3: quantile_sorted(&sorted, 0.75),
            max: sorted[n - 1],
            lower_bound: None,
            upper_bound: None,
            outlier: false,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Linear-interpolated quantile of an ascending, non-empty slice.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Describe the given columns, or every numeric column when `columns` is `None`.
///
/// Columns without a single non-missing value are left out.
pub fn describe(df: &DataFrame, columns: Option<&[String]>) -> MistyResult<Vec<DescriptiveStats>> {
    let names: Vec<String> = match columns {
        Some(names) => names.to_vec(),
        None => df
            .get_columns()
            .iter()
            .filter(|c| c.dtype().is_primitive_numeric())
            .map(|c| c.name().to_string())
            .collect(),
    };

    let mut stats = Vec::with_capacity(names.len());
    for name in &names {
        let values: Vec<f64> = numeric_values(require_column(df, name)?)?
            .into_iter()
            .flatten()
            .collect();
        match DescriptiveStats::from_values(name, &values) {
            Some(s) => stats.push(s),
            None => debug!(column = %name, "no values to describe"),
        }
    }

    Ok(stats)
}

/// Flag columns whose maximum exceeds `Q3 + 1.5 * IQR`.
///
/// Both fences are stored on each entry, but only the upper one decides the
/// flag: a column with low outliers only stays unflagged.
pub fn detect_outliers(stats: &mut [DescriptiveStats]) -> BTreeSet<String> {
    let mut flagged = BTreeSet::new();

    for s in stats.iter_mut() {
        let iqr = s.iqr();
        let upper = s.q3 + IQR_FENCE * iqr;
        let lower = s.q1 - IQR_FENCE * iqr;

        s.upper_bound = Some(upper);
        s.lower_bound = Some(lower);
        s.outlier = s.max > upper;

        if s.outlier {
            flagged.insert(s.column.clone());
        }
    }

    flagged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_with_quartiles(q1: f64, q3: f64, min: f64, max: f64) -> DescriptiveStats {
        DescriptiveStats {
            column: "price".to_string(),
            count: 10,
            mean: 20.0,
            std: Some(5.0),
            min,
            q1,
            median: (q1 + q3) / 2.0,
            q3,
            max,
            lower_bound: None,
            upper_bound: None,
            outlier: false,
        }
    }

    #[test]
    fn test_quantiles_match_linear_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert!((quantile_sorted(&sorted, 0.25) - 1.75).abs() < 1e-12);
        assert!((quantile_sorted(&sorted, 0.5) - 2.5).abs() < 1e-12);
        assert!((quantile_sorted(&sorted, 0.75) - 3.25).abs() < 1e-12);
    }

    #[test]
    fn test_from_values_single_value() {
        let s = DescriptiveStats::from_values("x", &[4.0]).unwrap();
        assert_eq!(s.count, 1);
        assert_eq!(s.std, None);
        assert_eq!(s.q1, 4.0);
        assert_eq!(s.q3, 4.0);
    }

    #[test]
    fn test_upper_fence_flags_outlier() {
        let mut stats = vec![stats_with_quartiles(10.0, 20.0, 5.0, 100.0)];
        let flagged = detect_outliers(&mut stats);

        assert_eq!(stats[0].upper_bound, Some(35.0));
        assert_eq!(stats[0].lower_bound, Some(-5.0));
        assert!(stats[0].outlier);
        assert!(flagged.contains("price"));
    }

    #[test]
    fn test_low_outlier_is_not_flagged() {
        // min sits far below the lower fence but the flag only looks upward
        let mut stats = vec![stats_with_quartiles(10.0, 20.0, -500.0, 30.0)];
        let flagged = detect_outliers(&mut stats);

        assert!(stats[0].min < stats[0].lower_bound.unwrap());
        assert!(!stats[0].outlier);
        assert!(flagged.is_empty());
    }
}
