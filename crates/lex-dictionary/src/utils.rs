//! Shared utilities for data dictionary generation.

use polars::prelude::*;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::types::ColumnKind;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is a floating point type (and can hold NaN).
#[inline]
pub fn is_float_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Float32 | DataType::Float64)
}

/// How a column is summarized: numeric columns get moments and quartiles,
/// everything else gets frequency statistics.
pub fn column_kind(dtype: &DataType) -> ColumnKind {
    if is_numeric_dtype(dtype) {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    }
}

// =============================================================================
// Series Utilities
// =============================================================================

/// Non-missing values of a series rendered as text, in row order.
///
/// Strings are taken as-is; other dtypes are cast to string, falling back to
/// the `AnyValue` display for dtypes without a string cast.
pub fn collect_text_values(series: &Series) -> PolarsResult<Vec<String>> {
    if let Ok(str_chunked) = series.str() {
        return Ok(str_chunked
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect());
    }

    if let Ok(str_series) = series.cast(&DataType::String) {
        return Ok(str_series
            .str()?
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect());
    }

    let mut values = Vec::with_capacity(series.len());
    for i in 0..series.len() {
        let value = series.get(i)?;
        if !value.is_null() {
            values.push(format!("{}", value));
        }
    }
    Ok(values)
}

/// Number of NaN cells in a floating point series (0 for other dtypes).
pub fn count_nan(series: &Series) -> PolarsResult<usize> {
    if !is_float_dtype(series.dtype()) {
        return Ok(0);
    }

    let float_series = series.cast(&DataType::Float64)?;
    Ok(float_series
        .f64()?
        .into_iter()
        .filter(|v| v.is_some_and(f64::is_nan))
        .count())
}

// =============================================================================
// Path Utilities
// =============================================================================

/// Suffix appended to the dataset path to name its dictionary.
pub const DICTIONARY_SUFFIX: &str = ".txt";

/// Display name of a dataset: the final path component.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Path of the dictionary report for a dataset.
///
/// The suffix is appended, never substituted: `data.csv` -> `data.csv.txt`.
pub fn dictionary_path(dataset_path: &Path) -> PathBuf {
    let mut path = OsString::from(dataset_path.as_os_str());
    path.push(DICTIONARY_SUFFIX);
    PathBuf::from(path)
}

// =============================================================================
// Tests
// =============================================================================
