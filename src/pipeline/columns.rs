//! Column classification and typed value access

use polars::prelude::*;
use serde::Serialize;

use crate::error::{MistyError, MistyResult};

/// Categorical and numerical column names, in table order.
///
/// The two sets are disjoint. Boolean and temporal columns belong to neither.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnSet {
    pub categorical: Vec<String>,
    pub numerical: Vec<String>,
}

impl ColumnSet {
    pub fn is_empty(&self) -> bool {
        self.categorical.is_empty() && self.numerical.is_empty()
    }
}

/// Text-like dtypes are treated as categorical.
pub fn is_categorical_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::String | DataType::Categorical(_, _) | DataType::Enum(_, _)
    )
}

/// Split the table's columns into categorical and numerical sets.
///
/// The target never lands in the numerical set, and neither does any name in
/// `excluded_numerical`. Categorical columns are not filtered.
pub fn classify_columns(df: &DataFrame, target: &str, excluded_numerical: &[String]) -> ColumnSet {
    let mut columns = ColumnSet::default();

    for col in df.get_columns() {
        let name = col.name().as_str();
        if is_categorical_dtype(col.dtype()) {
            columns.categorical.push(name.to_string());
        } else if col.dtype().is_primitive_numeric()
            && name != target
            && !excluded_numerical.iter().any(|e| e == name)
        {
            columns.numerical.push(name.to_string());
        }
    }

    columns
}

/// Look up a column, failing with the list of available names.
pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> MistyResult<&'a Column> {
    df.column(name).map_err(|_| MistyError::ColumnNotFound {
        name: name.to_string(),
        available: df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect(),
    })
}

/// Per-row missingness: null, or NaN in a floating-point column.
pub fn missing_mask(col: &Column) -> MistyResult<Vec<bool>> {
    if col.dtype().is_float() {
        let cast = col.cast(&DataType::Float64)?;
        return Ok(cast
            .f64()?
            .into_iter()
            .map(|v| v.map_or(true, f64::is_nan))
            .collect());
    }

    Ok(col
        .as_materialized_series()
        .is_null()
        .into_iter()
        .map(|v| v.unwrap_or(true))
        .collect())
}

/// Numeric values as `f64`, with missing values (null or NaN) as `None`.
pub fn numeric_values(col: &Column) -> MistyResult<Vec<Option<f64>>> {
    let cast = col.cast(&DataType::Float64)?;
    Ok(cast
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

/// Category labels as strings, with nulls as `None`.
pub fn category_values(col: &Column) -> MistyResult<Vec<Option<String>>> {
    let cast = col.cast(&DataType::String)?;
    Ok(cast
        .str()?
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect())
}
