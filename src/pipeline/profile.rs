//! Column profiles feeding the charts: dtypes, skewness, category counts

use std::collections::HashMap;

use polars::prelude::*;

use super::columns::{category_values, numeric_values, require_column};
use crate::error::MistyResult;

/// Number of columns per dtype, most common first.
pub fn dtype_distribution(df: &DataFrame) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for col in df.get_columns() {
        *counts.entry(col.dtype().to_string()).or_default() += 1;
    }

    let mut distribution: Vec<(String, usize)> = counts.into_iter().collect();
    distribution.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    distribution
}

/// Sample skewness (adjusted Fisher-Pearson) of the non-missing values.
///
/// `None` with fewer than three values or zero variance.
pub fn sample_skewness(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 3 {
        return None;
    }

    let nf = n as f64;
    let mean = values.iter().sum::<f64>() / nf;
    let m2 = values.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / nf;
    let m3 = values.iter().map(|&x| (x - mean).powi(3)).sum::<f64>() / nf;
    if m2 == 0.0 {
        return None;
    }

    let g1 = m3 / m2.powf(1.5);
    Some(g1 * (nf * (nf - 1.0)).sqrt() / (nf - 2.0))
}

/// Skewness per column, for the given columns or every numeric one.
///
/// Columns whose skewness is undefined are left out.
pub fn skewness(df: &DataFrame, columns: Option<&[String]>) -> MistyResult<Vec<(String, f64)>> {
    let names: Vec<String> = match columns {
        Some(names) => names.to_vec(),
        None => df
            .get_columns()
            .iter()
            .filter(|c| c.dtype().is_primitive_numeric())
            .map(|c| c.name().to_string())
            .collect(),
    };

    let mut out = Vec::with_capacity(names.len());
    for name in names {
        let values: Vec<f64> = numeric_values(require_column(df, &name)?)?
            .into_iter()
            .flatten()
            .collect();
        if let Some(skew) = sample_skewness(&values) {
            out.push((name, skew));
        }
    }
    Ok(out)
}

/// Value counts of a column, most frequent first; `top == 0` keeps all.
pub fn category_counts(df: &DataFrame, column: &str, top: usize) -> MistyResult<Vec<(String, usize)>> {
    let values = category_values(require_column(df, column)?)?;

    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in values.into_iter().flatten() {
        *counts.entry(value).or_default() += 1;
    }

    let mut sorted: Vec<(String, usize)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    if top > 0 {
        sorted.truncate(top);
    }
    Ok(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_distribution() {
        let df = df! {
            "a" => [1.0f64, 2.0],
            "b" => [3.0f64, 4.0],
            "c" => ["x", "y"],
        }
        .unwrap();

        let dist = dtype_distribution(&df);
        assert_eq!(dist.len(), 2);
        assert_eq!(dist[0].1, 2);
        assert_eq!(dist[1].1, 1);
    }

    #[test]
    fn test_symmetric_data_has_zero_skew() {
        let skew = sample_skewness(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!(skew.abs() < 1e-12);
    }

    #[test]
    fn test_right_tail_is_positive() {
        let skew = sample_skewness(&[1.0, 1.0, 1.0, 2.0, 10.0]).unwrap();
        assert!(skew > 1.0);
    }

    #[test]
    fn test_constant_has_no_skew() {
        assert_eq!(sample_skewness(&[2.0, 2.0, 2.0]), None);
    }

    #[test]
    fn test_category_counts_top() {
        let df = df! {
            "room_type" => [Some("Entire home"), Some("Private room"), Some("Entire home"), None, Some("Hotel room")],
        }
        .unwrap();

        let counts = category_counts(&df, "room_type", 2).unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0], ("Entire home".to_string(), 2));
        assert_eq!(counts[1].1, 1);
    }
}
