//! Data dictionary report rendering.
//!
//! The report is a plain-text file written next to the dataset:
//!
//! ```text
//! Data dictionary for demo.csv @ 2024-03-09 07:05:01
//! Dataset shape, 3 rows x 2 columns.
//!
//! <summary text>
//!
//!
//! Data Dictionary
//! ---------------
//!       count  unique  top  freq  mean ...  Missing  %Missing
//! colA      2       -    -     -  2.00 ...        1     33.33
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use lex_dictionary::reporting::{ReportGenerator, ReportParams};
//!
//! let generator = ReportGenerator::from_config(&config);
//! let text = generator.render(ReportParams {
//!     display_name: "demo.csv",
//!     generated_at: chrono::Local::now(),
//!     summary_text: "Demo dataset.",
//!     table: &table,
//! });
//! generator.write_report(Path::new("demo.csv.txt"), &text)?;
//! ```

mod generator;
mod table;

pub use generator::{ReportGenerator, ReportParams, SECTION_LABEL, TIMESTAMP_FORMAT};
pub use table::render_table;
