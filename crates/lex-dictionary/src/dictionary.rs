//! Data dictionary generation.
//!
//! [`DictionaryGenerator`] runs the whole flow for one dataset: load the file,
//! summarize its columns, render the report and write it to
//! `<dataset path>.txt`.

use chrono::{DateTime, Local};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::DictionaryConfig;
use crate::error::{DictionaryError, Result};
use crate::loader::load_dataset;
use crate::profiler::DataProfiler;
use crate::reporting::{ReportGenerator, ReportParams};
use crate::types::SummaryTable;
use crate::utils::{dictionary_path, display_name};

/// Generates data dictionaries with a fixed configuration.
///
/// # Example
///
/// ```rust,ignore
/// use lex_dictionary::{DictionaryConfig, DictionaryGenerator};
///
/// let generator = DictionaryGenerator::new(DictionaryConfig::default());
/// let table = generator.generate("data/demo.csv", "Demo dataset.")?;
/// // data/demo.csv.txt now holds the report
/// println!("{} columns summarized", table.len());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DictionaryGenerator {
    config: DictionaryConfig,
}

impl DictionaryGenerator {
    pub fn new(config: DictionaryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DictionaryConfig {
        &self.config
    }

    /// Generate the data dictionary of the dataset at `path`.
    ///
    /// Writes the report to `<path>.txt`, replacing any existing file, and
    /// returns the summary table. The dataset file itself is never modified.
    pub fn generate(&self, path: impl AsRef<Path>, summary_text: &str) -> Result<SummaryTable> {
        self.generate_at(path, summary_text, Local::now())
    }

    /// Same as [`generate`](Self::generate) with an explicit report timestamp.
    pub fn generate_at(
        &self,
        path: impl AsRef<Path>,
        summary_text: &str,
        generated_at: DateTime<Local>,
    ) -> Result<SummaryTable> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(DictionaryError::InvalidConfig(
                "dataset path must not be empty".to_string(),
            ));
        }

        self.config.validate()?;

        let name = display_name(path);
        let output_path = dictionary_path(path);
        info!(
            "Generating data dictionary for '{}' -> {}",
            name,
            output_path.display()
        );

        let df = load_dataset(path, self.config.loader, &self.config.load_options)?;
        if df.height() == 0 {
            warn!("Dataset '{}' has no rows", name);
        }

        let table = DataProfiler::summarize(&df, self.config.include)?;
        debug!(
            "Summary table: {} columns ({} numeric)",
            table.len(),
            table.iter().filter(|c| c.numeric().is_some()).count()
        );

        let generator = ReportGenerator::from_config(&self.config);
        let report = generator.render(ReportParams {
            display_name: &name,
            generated_at,
            summary_text,
            table: &table,
        });
        generator.write_report(&output_path, &report)?;

        info!("Data dictionary complete: {} columns", table.len());
        Ok(table)
    }
}

/// Generate a data dictionary for `path` with the given configuration.
///
/// Shorthand for `DictionaryGenerator::new(config.clone()).generate(path, summary_text)`.
pub fn generate(
    path: impl AsRef<Path>,
    summary_text: &str,
    config: &DictionaryConfig,
) -> Result<SummaryTable> {
    DictionaryGenerator::new(config.clone()).generate(path, summary_text)
}

static_assertions::assert_impl_all!(DictionaryGenerator: Send, Sync);
static_assertions::assert_impl_all!(DictionaryConfig: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Include;
    use crate::loader::Loader;
    use chrono::TimeZone;
    use std::fs;

    fn write_demo(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("demo.csv");
        fs::write(&path, "colA,colB\n1,x\n,y\n3,x\n").unwrap();
        path
    }

    #[test]
    fn test_generate_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_demo(dir.path());

        let table = DictionaryGenerator::default()
            .generate(&path, "Demo dataset.")
            .unwrap();

        assert_eq!(table.shape(), (3, 2));
        let report = fs::read_to_string(dir.path().join("demo.csv.txt")).unwrap();
        assert!(report.starts_with("Data dictionary for demo.csv @ "));
        assert!(report.contains("Demo dataset."));
        assert!(report.contains("colA"));
    }

    #[test]
    fn test_generate_at_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_demo(dir.path());
        let at = Local.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();
        let generator = DictionaryGenerator::default();

        generator.generate_at(&path, "s", at).unwrap();
        let first = fs::read_to_string(dir.path().join("demo.csv.txt")).unwrap();
        generator.generate_at(&path, "s", at).unwrap();
        let second = fs::read_to_string(dir.path().join("demo.csv.txt")).unwrap();

        assert_eq!(first, second);
        assert!(first.starts_with("Data dictionary for demo.csv @ 2023-12-31 23:59:59\n"));
    }

    #[test]
    fn test_empty_path_rejected() {
        let err = DictionaryGenerator::default().generate("", "s").unwrap_err();
        assert!(matches!(err, DictionaryError::InvalidConfig(_)));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");

        let err = DictionaryGenerator::default().generate(&path, "s").unwrap_err();
        assert!(matches!(err, DictionaryError::LoadFailed { .. }));
        assert!(!dir.path().join("absent.csv.txt").exists());
    }

    #[test]
    fn test_invalid_config_fails_before_loading() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_demo(dir.path());
        let config = DictionaryConfig {
            na_rep: String::new(),
            ..DictionaryConfig::default()
        };

        let err = generate(&path, "s", &config).unwrap_err();
        assert!(matches!(err, DictionaryError::InvalidConfig(_)));
        assert!(!dir.path().join("demo.csv.txt").exists());
    }

    #[test]
    fn test_free_function_uses_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.tsv");
        fs::write(&path, "a\tb\n1\tq\n2\tr\n").unwrap();

        let config = DictionaryConfig::builder()
            .loader(Loader::Tsv)
            .include(Include::Numeric)
            .build()
            .unwrap();
        let table = generate(&path, "tabs", &config).unwrap();

        assert_eq!(table.len(), 1);
        assert!(table.get("a").is_some());
        assert!(dir.path().join("demo.tsv.txt").exists());
    }
}
