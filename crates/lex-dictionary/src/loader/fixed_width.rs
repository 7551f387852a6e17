//! Fixed-width text reader.
//!
//! Each line is cut into fields by character widths. Cells are trimmed and
//! empty cells (or null tokens) become nulls. A column is typed `Int64` when
//! every non-null cell parses as an integer, `Float64` when every cell parses
//! as a float, and `String` otherwise.

use polars::prelude::*;
use std::path::Path;
use tracing::debug;

use super::{LoadOptions, TextEncoding};
use crate::error::Result;

/// Read a fixed-width file into a DataFrame.
///
/// `options.widths` must be set; [`LoadOptions::validate_for`] checks this
/// before any file access.
pub fn read_fixed_width(path: &Path, options: &LoadOptions) -> Result<DataFrame> {
    let bytes = std::fs::read(path)?;
    let text = match options.encoding.unwrap_or_default() {
        TextEncoding::Utf8 => String::from_utf8(bytes).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.utf8_error())
        })?,
        TextEncoding::LossyUtf8 => String::from_utf8_lossy(&bytes).into_owned(),
    };

    parse_fixed_width(&text, options)
}

/// Parse fixed-width text that is already in memory.
pub(crate) fn parse_fixed_width(text: &str, options: &LoadOptions) -> Result<DataFrame> {
    let widths = options.widths.as_deref().unwrap_or_default();
    let null_values = options.effective_null_values();

    let mut lines = text
        .lines()
        .skip(options.skip_rows.unwrap_or(0))
        .filter(|line| !line.trim().is_empty());

    let names: Vec<String> = if options.has_header.unwrap_or(true) {
        match lines.next() {
            Some(header) => split_line(header, widths)
                .into_iter()
                .enumerate()
                .map(|(idx, name)| {
                    if name.is_empty() {
                        default_column_name(idx)
                    } else {
                        name
                    }
                })
                .collect(),
            None => (0..widths.len()).map(default_column_name).collect(),
        }
    } else {
        (0..widths.len()).map(default_column_name).collect()
    };

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); widths.len()];
    let rows = lines.take(options.n_rows.unwrap_or(usize::MAX));
    for line in rows {
        for (idx, value) in split_line(line, widths).into_iter().enumerate() {
            let cell = if value.is_empty() || null_values.contains(&value) {
                None
            } else {
                Some(value)
            };
            cells[idx].push(cell);
        }
    }

    debug!(
        "Fixed-width parse: {} columns, {} rows",
        names.len(),
        cells.first().map(Vec::len).unwrap_or(0)
    );

    let columns: Vec<Column> = names
        .iter()
        .zip(cells)
        .map(|(name, values)| typed_column(name, values))
        .collect();

    Ok(DataFrame::new(columns)?)
}

fn default_column_name(idx: usize) -> String {
    format!("column_{}", idx + 1)
}

/// Cut a line into trimmed fields. Short lines yield empty trailing fields.
fn split_line(line: &str, widths: &[usize]) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    let mut start = 0;
    widths
        .iter()
        .map(|width| {
            let end = (start + width).min(chars.len());
            let field: String = chars[start.min(end)..end].iter().collect();
            start += width;
            field.trim().to_string()
        })
        .collect()
}

/// Build the narrowest column type that fits every non-null cell.
fn typed_column(name: &str, values: Vec<Option<String>>) -> Column {
    let non_null = || values.iter().flatten();

    if non_null().all(|v| v.parse::<i64>().is_ok()) && non_null().next().is_some() {
        let parsed: Vec<Option<i64>> = values
            .iter()
            .map(|v| v.as_ref().and_then(|s| s.parse().ok()))
            .collect();
        return Series::new(name.into(), parsed).into_column();
    }

    if non_null().all(|v| v.parse::<f64>().is_ok()) && non_null().next().is_some() {
        let parsed: Vec<Option<f64>> = values
            .iter()
            .map(|v| v.as_ref().and_then(|s| s.parse().ok()))
            .collect();
        return Series::new(name.into(), parsed).into_column();
    }

    Series::new(name.into(), values).into_column()
}
