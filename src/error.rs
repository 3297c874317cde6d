//! Error types for table validation

use polars::prelude::PolarsError;

/// Errors raised when a table or target does not fit the requested analysis.
///
/// Degenerate statistical tests are not errors; they surface as
/// [`SkipReason`](crate::pipeline::SkipReason) on the affected column.
#[derive(Debug, thiserror::Error)]
pub enum MistyError {
    #[error("column '{name}' not found. Available columns: {available:?}")]
    ColumnNotFound { name: String, available: Vec<String> },

    #[error("target column '{name}' has dtype {dtype}; value partitioning requires a boolean column")]
    NonBooleanTarget { name: String, dtype: String },

    #[error("target column '{name}' has {count} null value(s); value partitioning requires a complete boolean column")]
    NullsInBooleanTarget { name: String, count: usize },

    #[error("outcome column '{name}' has dtype {dtype}; ANOVA requires a numeric outcome")]
    NonNumericOutcome { name: String, dtype: String },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

pub type MistyResult<T> = std::result::Result<T, MistyError>;
