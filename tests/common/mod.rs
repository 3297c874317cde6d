//! Shared test utilities and fixture generators
#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a listings DataFrame with known missingness patterns
///
/// 40 rows. This DataFrame includes:
/// - `price`: the target, missing for 18/20 Paris rows and 2/20 Lyon rows
/// - `city`: strongly associated with price missingness
/// - `neighbourhood`: alternating "A"/"B", not associated
/// - `country`: constant "France" (chi-square must skip it)
/// - `reviews`: much higher where price is missing
/// - `beds`: missing on every fourth row
/// - `id`: row number
/// - `all_null`: numeric column with no values (t-test must skip it)
/// - `superhost`: boolean without nulls, for value mode
pub fn create_listings_dataframe() -> DataFrame {
    let n = 40;
    let rows: Vec<usize> = (0..n).collect();

    let city: Vec<&str> = rows
        .iter()
        .map(|&i| if i < 20 { "Paris" } else { "Lyon" })
        .collect();
    let price_missing: Vec<bool> = rows
        .iter()
        .map(|&i| if i < 20 { i % 10 != 0 } else { i % 10 == 0 })
        .collect();
    let price: Vec<Option<f64>> = rows
        .iter()
        .zip(&price_missing)
        .map(|(&i, &missing)| (!missing).then_some(100.0 + i as f64))
        .collect();
    let reviews: Vec<f64> = rows
        .iter()
        .zip(&price_missing)
        .map(|(&i, &missing)| {
            let base = if missing { 50.0 } else { 10.0 };
            base + (i % 5) as f64
        })
        .collect();
    let neighbourhood: Vec<&str> = rows
        .iter()
        .map(|&i| if i % 2 == 0 { "A" } else { "B" })
        .collect();
    let beds: Vec<Option<f64>> = rows
        .iter()
        .map(|&i| (i % 4 != 0).then_some((i % 3 + 1) as f64))
        .collect();
    let id: Vec<i64> = rows.iter().map(|&i| i as i64).collect();
    let superhost: Vec<bool> = rows.iter().map(|&i| i % 3 == 0).collect();

    df! {
        "id" => id,
        "city" => city,
        "neighbourhood" => neighbourhood,
        "country" => vec!["France"; n],
        "price" => price,
        "reviews" => reviews,
        "beds" => beds,
        "all_null" => vec![None::<f64>; n],
        "superhost" => superhost,
    }
    .unwrap()
}

/// Create a larger random listings DataFrame for performance/stress tests
pub fn create_large_listings_dataframe(rows: usize, cols: usize) -> DataFrame {
    use rand::Rng;
    let mut rng = rand::thread_rng();

    let mut columns: Vec<Column> = Vec::with_capacity(cols + 2);

    let price: Vec<Option<f64>> = (0..rows)
        .map(|_| rng.gen_bool(0.7).then(|| rng.gen_range(20.0..500.0)))
        .collect();
    columns.push(Column::new("price".into(), price));

    let city: Vec<&str> = (0..rows)
        .map(|_| ["Paris", "Lyon", "Nice", "Lille"][rng.gen_range(0..4)])
        .collect();
    columns.push(Column::new("city".into(), city));

    for i in 0..cols {
        let values: Vec<f64> = (0..rows).map(|_| rng.gen::<f64>()).collect();
        columns.push(Column::new(format!("feature_{}", i).into(), values));
    }

    DataFrame::new(columns).unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("listings.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("listings.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Create a temporary directory with a gzipped CSV file
pub fn create_temp_csv_gz(df: &mut DataFrame) -> (TempDir, PathBuf) {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    let mut csv = Vec::new();
    CsvWriter::new(&mut csv).finish(df).unwrap();

    let temp_dir = TempDir::new().unwrap();
    let gz_path = temp_dir.path().join("listings.csv.gz");

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&csv).unwrap();
    std::fs::write(&gz_path, encoder.finish().unwrap()).unwrap();

    (temp_dir, gz_path)
}

/// Assert that a DataFrame has the expected columns
pub fn assert_has_columns(df: &DataFrame, expected: &[&str]) {
    let actual: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    for col in expected {
        assert!(
            actual.contains(&col.to_string()),
            "Expected column '{}' not found in DataFrame. Available: {:?}",
            col,
            actual
        );
    }
}
