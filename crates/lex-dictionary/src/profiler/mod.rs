//! Per-column profiling of a loaded dataset.
//!
//! This module turns a DataFrame into a [`SummaryTable`]:
//! - numeric columns get count, mean, std, min, quartiles and max
//! - every other column gets count, distinct count, top value and frequency
//! - every column gets its missing count and missing percentage

mod statistics;

use polars::prelude::*;
use tracing::debug;

use crate::config::Include;
use crate::error::{DictionaryError, Result, ResultExt};
use crate::types::{ColumnKind, ColumnStats, ColumnSummary, SummaryTable};
use crate::utils::{column_kind, count_nan};

use statistics::{categorical_stats, missing_percentage, numeric_stats};

/// Data profiler producing the data dictionary table.
pub struct DataProfiler;

impl DataProfiler {
    /// Summarize every column selected by `include`, in dataset order.
    ///
    /// Fails with [`DictionaryError::NoMatchingColumns`] when the selector
    /// matches no column.
    pub fn summarize(df: &DataFrame, include: Include) -> Result<SummaryTable> {
        let mut columns = Vec::new();

        for column in df.get_columns() {
            let kind = column_kind(column.dtype());
            if !Self::is_selected(kind, include) {
                debug!("Skipping column '{}' ({:?})", column.name(), kind);
                continue;
            }

            let summary = Self::summarize_column(column.as_materialized_series(), kind, df.height())
                .context(format!("Summarizing column '{}'", column.name()))?;
            columns.push(summary);
        }

        if columns.is_empty() {
            return Err(DictionaryError::NoMatchingColumns {
                include: include.to_string(),
            });
        }

        debug!(
            "Summarized {} of {} columns over {} rows",
            columns.len(),
            df.width(),
            df.height()
        );

        Ok(SummaryTable {
            row_count: df.height(),
            column_count: df.width(),
            columns,
        })
    }

    fn is_selected(kind: ColumnKind, include: Include) -> bool {
        match include {
            Include::All => true,
            Include::Numeric => kind == ColumnKind::Numeric,
            Include::Categorical => kind == ColumnKind::Categorical,
        }
    }

    fn summarize_column(series: &Series, kind: ColumnKind, rows: usize) -> Result<ColumnSummary> {
        let missing = series.null_count() + count_nan(series)?;
        let count = rows - missing;

        let stats = match kind {
            ColumnKind::Numeric => ColumnStats::Numeric(numeric_stats(series)?),
            ColumnKind::Categorical => ColumnStats::Categorical(categorical_stats(series)?),
        };

        Ok(ColumnSummary {
            name: series.name().to_string(),
            dtype: format!("{}", series.dtype()),
            count,
            stats,
            missing,
            missing_percent: missing_percentage(missing, rows),
        })
    }
}
