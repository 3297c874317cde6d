//! Target partitioning
//!
//! Turns a target column into a per-row boolean vector that the association
//! tests split the other columns by.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::columns::{missing_mask, require_column};
use crate::error::{MistyError, MistyResult};

/// How the target column is turned into a binary partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionMode {
    /// `true` where the target value is missing
    #[default]
    Missing,
    /// The target's own boolean value
    Value,
}

impl std::fmt::Display for PartitionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PartitionMode::Missing => write!(f, "missingness"),
            PartitionMode::Value => write!(f, "value"),
        }
    }
}

/// Build the binary partition for `target`.
///
/// In [`PartitionMode::Value`] the target must be a boolean column without
/// nulls; any other dtype is rejected rather than coerced.
pub fn partition_target(df: &DataFrame, target: &str, mode: PartitionMode) -> MistyResult<Vec<bool>> {
    let col = require_column(df, target)?;

    match mode {
        PartitionMode::Missing => missing_mask(col),
        PartitionMode::Value => {
            if col.dtype() != &DataType::Boolean {
                return Err(MistyError::NonBooleanTarget {
                    name: target.to_string(),
                    dtype: col.dtype().to_string(),
                });
            }
            if col.null_count() > 0 {
                return Err(MistyError::NullsInBooleanTarget {
                    name: target.to_string(),
                    count: col.null_count(),
                });
            }
            Ok(col.bool()?.into_iter().map(|v| v.unwrap_or(false)).collect())
        }
    }
}

/// Count rows on each side of a partition: `(true, false)`.
pub fn partition_counts(partition: &[bool]) -> (usize, usize) {
    let positives = partition.iter().filter(|&&v| v).count();
    (positives, partition.len() - positives)
}
