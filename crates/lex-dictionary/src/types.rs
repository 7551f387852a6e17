use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How a column is summarized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

/// Moments and quartiles of a numeric column.
///
/// Every field is `None` when the column has no non-missing values; `std`
/// is also `None` with fewer than two values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Frequency statistics of a categorical column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalStats {
    /// Distinct non-missing values
    pub unique: usize,
    /// Most frequent value (first seen wins ties)
    pub top: Option<String>,
    /// Occurrences of `top`
    pub freq: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnStats {
    Numeric(NumericStats),
    Categorical(CategoricalStats),
}

/// One row of the data dictionary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    pub dtype: String,
    /// Non-missing values
    pub count: usize,
    pub stats: ColumnStats,
    pub missing: usize,
    /// `100 * missing / rows`, 0.0 for an empty dataset
    pub missing_percent: f64,
}

impl ColumnSummary {
    pub fn kind(&self) -> ColumnKind {
        match self.stats {
            ColumnStats::Numeric(_) => ColumnKind::Numeric,
            ColumnStats::Categorical(_) => ColumnKind::Categorical,
        }
    }

    pub fn numeric(&self) -> Option<&NumericStats> {
        match &self.stats {
            ColumnStats::Numeric(stats) => Some(stats),
            ColumnStats::Categorical(_) => None,
        }
    }

    pub fn categorical(&self) -> Option<&CategoricalStats> {
        match &self.stats {
            ColumnStats::Categorical(stats) => Some(stats),
            ColumnStats::Numeric(_) => None,
        }
    }

    /// Rows covered by this summary (`count + missing`).
    pub fn total(&self) -> usize {
        self.count + self.missing
    }
}

/// Per-column statistics of a dataset, in dataset column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTable {
    /// Rows in the dataset
    pub row_count: usize,
    /// Columns in the dataset (summarized or not)
    pub column_count: usize,
    pub columns: Vec<ColumnSummary>,
}

impl SummaryTable {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.row_count, self.column_count)
    }

    /// Look up a column summary by name.
    pub fn get(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|col| col.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnSummary> {
        self.columns.iter()
    }

    pub fn has_numeric(&self) -> bool {
        self.columns.iter().any(|c| c.kind() == ColumnKind::Numeric)
    }

    pub fn has_categorical(&self) -> bool {
        self.columns
            .iter()
            .any(|c| c.kind() == ColumnKind::Categorical)
    }

    /// Convert to a DataFrame with one row per summarized column.
    ///
    /// Columns: `column`, `count`, `unique`, `top`, `freq`, `mean`, `std`,
    /// `min`, `25%`, `50%`, `75%`, `max`, `Missing`, `%Missing`. Statistics
    /// that do not apply to a column are null.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let names: Vec<&str> = self.columns.iter().map(|c| c.name.as_str()).collect();
        let counts: Vec<u64> = self.columns.iter().map(|c| c.count as u64).collect();
        let missing: Vec<u64> = self.columns.iter().map(|c| c.missing as u64).collect();
        let missing_pct: Vec<f64> = self.columns.iter().map(|c| c.missing_percent).collect();

        let unique: Vec<Option<u64>> = self
            .columns
            .iter()
            .map(|c| c.categorical().map(|s| s.unique as u64))
            .collect();
        let top: Vec<Option<String>> = self
            .columns
            .iter()
            .map(|c| c.categorical().and_then(|s| s.top.clone()))
            .collect();
        let freq: Vec<Option<u64>> = self
            .columns
            .iter()
            .map(|c| c.categorical().and_then(|s| s.freq.map(|f| f as u64)))
            .collect();

        let numeric = |pick: fn(&NumericStats) -> Option<f64>| -> Vec<Option<f64>> {
            self.columns
                .iter()
                .map(|c| c.numeric().and_then(pick))
                .collect()
        };

        let columns = vec![
            Series::new("column".into(), names).into_column(),
            Series::new("count".into(), counts).into_column(),
            Series::new("unique".into(), unique).into_column(),
            Series::new("top".into(), top).into_column(),
            Series::new("freq".into(), freq).into_column(),
            Series::new("mean".into(), numeric(|s| s.mean)).into_column(),
            Series::new("std".into(), numeric(|s| s.std)).into_column(),
            Series::new("min".into(), numeric(|s| s.min)).into_column(),
            Series::new("25%".into(), numeric(|s| s.q25)).into_column(),
            Series::new("50%".into(), numeric(|s| s.median)).into_column(),
            Series::new("75%".into(), numeric(|s| s.q75)).into_column(),
            Series::new("max".into(), numeric(|s| s.max)).into_column(),
            Series::new("Missing".into(), missing).into_column(),
            Series::new("%Missing".into(), missing_pct).into_column(),
        ];

        Ok(DataFrame::new(columns)?)
    }
}
