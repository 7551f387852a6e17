use chrono::{DateTime, Local};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

use super::table::render_table;
use crate::config::{DictionaryConfig, FloatFormatter};
use crate::error::{DictionaryError, Result};
use crate::types::SummaryTable;

/// Timestamp format of the report header.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Section label written above the table.
pub const SECTION_LABEL: &str = "Data Dictionary\n---------------\n";

/// Inputs of one rendered report.
pub struct ReportParams<'a> {
    /// Dataset display name (final path component)
    pub display_name: &'a str,
    pub generated_at: DateTime<Local>,
    pub summary_text: &'a str,
    pub table: &'a SummaryTable,
}

/// Renders and writes data dictionary reports.
#[derive(Debug, Clone, Default)]
pub struct ReportGenerator {
    float_format: FloatFormatter,
    na_rep: String,
}

impl ReportGenerator {
    /// Create a ReportGenerator with custom cell formatting.
    pub fn new(float_format: FloatFormatter, na_rep: impl Into<String>) -> Self {
        Self {
            float_format,
            na_rep: na_rep.into(),
        }
    }

    /// Create a ReportGenerator using the formatting options of `config`.
    pub fn from_config(config: &DictionaryConfig) -> Self {
        Self::new(config.float_format.clone(), config.na_rep.clone())
    }

    /// Render the complete report text.
    ///
    /// Layout: header line, shape line, blank line, summary text, two blank
    /// lines, section label, table.
    pub fn render(&self, params: ReportParams<'_>) -> String {
        let ReportParams {
            display_name,
            generated_at,
            summary_text,
            table,
        } = params;

        let mut report = String::new();
        report.push_str(&format!(
            "Data dictionary for {} @ {}\n",
            display_name,
            generated_at.format(TIMESTAMP_FORMAT)
        ));
        report.push_str(&format!(
            "Dataset shape, {} rows x {} columns.\n\n",
            table.row_count, table.column_count
        ));
        report.push_str(summary_text);
        report.push_str("\n\n\n");
        report.push_str(SECTION_LABEL);
        report.push_str(&render_table(table, &self.float_format, &self.na_rep));

        debug!("Rendered report: {} bytes", report.len());
        report
    }

    /// Write rendered report text to `path`, replacing any existing file.
    ///
    /// The file is only opened once the text is complete, so a failure while
    /// rendering never truncates an earlier report.
    pub fn write_report(&self, path: &Path, contents: &str) -> Result<()> {
        let write_failed = |source: std::io::Error| DictionaryError::WriteFailed {
            path: path.display().to_string(),
            source,
        };

        let file = File::create(path).map_err(write_failed)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(contents.as_bytes()).map_err(write_failed)?;
        writer.flush().map_err(write_failed)?;

        info!("Report saved: {}", path.display());
        Ok(())
    }
}
