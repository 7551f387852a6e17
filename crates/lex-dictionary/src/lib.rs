//! Data Dictionary Generator Library
//!
//! Produces a plain-text data dictionary for a tabular dataset, built with
//! Rust and Polars.
//!
//! # Overview
//!
//! For one dataset file the library:
//!
//! - **Loads** it with a selectable reader (CSV, TSV, Parquet, IPC, JSON,
//!   NDJSON or fixed-width text)
//! - **Summarizes** every selected column: count, mean, std, min, quartiles
//!   and max for numeric columns; distinct count, top value and frequency for
//!   the others; missing count and missing percentage for all of them
//! - **Writes** the report to `<dataset path>.txt` and returns the summary
//!   table to the caller
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lex_dictionary::{DictionaryConfig, DictionaryGenerator, Include};
//!
//! // Defaults: CSV reader, all columns, two decimal digits
//! let table = DictionaryGenerator::default()
//!     .generate("data/demo.csv", "Demo dataset collected in 2024.")?;
//!
//! for column in table.iter() {
//!     println!("{}: {} missing ({:.2}%)", column.name, column.missing, column.missing_percent);
//! }
//!
//! // Numeric columns of a TSV file, three decimal digits
//! let config = DictionaryConfig::builder()
//!     .loader_name("read_table")
//!     .include(Include::Numeric)
//!     .float_precision(3)
//!     .build()?;
//!
//! let table = lex_dictionary::generate("data/demo.tsv", "Tab separated.", &config)?;
//! ```
//!
//! # Errors
//!
//! Every failure is a [`DictionaryError`]; [`DictionaryError::kind`] tells
//! loading, configuration and write failures apart.

pub mod config;
pub mod dictionary;
pub mod error;
pub mod loader;
pub mod profiler;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{
    ConfigValidationError, DictionaryConfig, DictionaryConfigBuilder, FloatFormatter, Include,
};
pub use dictionary::{DictionaryGenerator, generate};
pub use error::{DictionaryError, ErrorKind, Result as DictionaryResult, ResultExt};
pub use loader::{LoadOptions, Loader, TextEncoding, load_dataset};
pub use profiler::DataProfiler;
pub use reporting::{ReportGenerator, ReportParams};
pub use types::{CategoricalStats, ColumnKind, ColumnStats, ColumnSummary, NumericStats, SummaryTable};
pub use utils::{column_kind, dictionary_path, display_name, is_numeric_dtype};
