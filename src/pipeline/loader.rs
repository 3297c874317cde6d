//! Dataset loader for CSV (optionally gzipped) and Parquet files

use std::io::{Cursor, Read};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use polars::prelude::*;

/// Leading bytes of a gzip stream
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Load a dataset from a file (CSV, gzipped CSV or Parquet based on extension)
///
/// `infer_schema_length` of 0 scans the whole file for CSV type inference.
pub fn load_table(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_lowercase();

    if file_name.ends_with(".gz") {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        return read_csv_bytes(bytes, infer_schema_length)
            .with_context(|| format!("Failed to load gzipped CSV file: {}", path.display()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let df = match extension.as_str() {
        "csv" => CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(schema_length(infer_schema_length))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .and_then(|reader| reader.finish())
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open file: {}", path.display()))?;
            ParquetReader::new(file)
                .finish()
                .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?
        }
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, csv.gz, parquet",
            extension
        ),
    };

    Ok(df)
}

/// Parse CSV from memory, gunzipping first when the bytes are gzip-compressed
pub fn read_csv_bytes(bytes: Vec<u8>, infer_schema_length: usize) -> Result<DataFrame> {
    let bytes = if is_gzip(&bytes) {
        let mut decoded = Vec::new();
        GzDecoder::new(bytes.as_slice())
            .read_to_end(&mut decoded)
            .context("Failed to decompress gzip data")?;
        decoded
    } else {
        bytes
    };

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(schema_length(infer_schema_length))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .context("Failed to parse CSV data")
}

/// Save dataset to file (CSV, gzipped CSV or Parquet based on extension)
pub fn save_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_lowercase();

    if file_name.ends_with(".csv.gz") {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        CsvWriter::new(&mut encoder)
            .finish(df)
            .with_context(|| format!("Failed to write gzipped CSV file: {}", path.display()))?;
        encoder
            .finish()
            .with_context(|| format!("Failed to finish gzip stream: {}", path.display()))?;
        return Ok(());
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "csv" => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            CsvWriter::new(&mut file)
                .finish(df)
                .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        }
        "parquet" => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            ParquetWriter::new(file)
                .finish(df)
                .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
        }
        _ => anyhow::bail!(
            "Unsupported output format: {}. Supported formats: csv, csv.gz, parquet",
            extension
        ),
    }

    Ok(())
}

/// Estimated in-memory size in MB
pub fn estimated_size_mb(df: &DataFrame) -> f64 {
    df.estimated_size() as f64 / (1024.0 * 1024.0)
}

fn is_gzip(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}

// 0 means full table scan
fn schema_length(infer_schema_length: usize) -> Option<usize> {
    if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    }
}
