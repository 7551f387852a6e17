//! Dataset loading.
//!
//! A dataset is read by one of the enumerated [`Loader`] strategies. Loaders
//! can be picked statically or resolved from a name such as `"read_csv"`;
//! unknown names are rejected instead of being looked up dynamically.
//!
//! Loader-specific arguments travel in [`LoadOptions`]. Options that make no
//! sense for the selected loader are a configuration error, not silently
//! ignored.

mod fixed_width;

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use crate::config::ConfigValidationError;
use crate::error::{DictionaryError, Result};

pub use fixed_width::read_fixed_width;

/// Tokens treated as missing by the text loaders unless disabled with
/// [`LoadOptions::keep_default_na`].
pub const DEFAULT_NULL_VALUES: [&str; 12] = [
    "NA", "N/A", "n/a", "NaN", "nan", "NULL", "null", "None", "<NA>", "#N/A", "#NA", "-NaN",
];

/// Supported dataset loaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Loader {
    /// Comma-separated values
    #[default]
    Csv,
    /// Tab-separated values
    Tsv,
    /// Apache Parquet
    Parquet,
    /// Arrow IPC / Feather
    Ipc,
    /// JSON array of records
    Json,
    /// Newline-delimited JSON records
    NdJson,
    /// Fixed-width text columns
    FixedWidth,
}

impl Loader {
    /// Every supported loader.
    pub const ALL: [Loader; 7] = [
        Loader::Csv,
        Loader::Tsv,
        Loader::Parquet,
        Loader::Ipc,
        Loader::Json,
        Loader::NdJson,
        Loader::FixedWidth,
    ];

    /// Canonical reader name.
    pub fn name(&self) -> &'static str {
        match self {
            Loader::Csv => "read_csv",
            Loader::Tsv => "read_table",
            Loader::Parquet => "read_parquet",
            Loader::Ipc => "read_ipc",
            Loader::Json => "read_json",
            Loader::NdJson => "read_ndjson",
            Loader::FixedWidth => "read_fwf",
        }
    }

    /// Options this loader understands.
    fn supported_options(&self) -> &'static [&'static str] {
        match self {
            Loader::Csv | Loader::Tsv => &[
                "separator",
                "has_header",
                "skip_rows",
                "n_rows",
                "quote_char",
                "null_values",
                "keep_default_na",
                "infer_schema_length",
                "encoding",
            ],
            Loader::FixedWidth => &[
                "widths",
                "has_header",
                "skip_rows",
                "n_rows",
                "null_values",
                "keep_default_na",
                "encoding",
            ],
            Loader::Parquet | Loader::Ipc | Loader::Json | Loader::NdJson => &["n_rows"],
        }
    }
}

impl fmt::Display for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Loader {
    type Err = ConfigValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let short = normalized.strip_prefix("read_").unwrap_or(&normalized);
        match short {
            "csv" => Ok(Loader::Csv),
            "table" | "tsv" => Ok(Loader::Tsv),
            "parquet" => Ok(Loader::Parquet),
            "ipc" | "feather" | "arrow" => Ok(Loader::Ipc),
            "json" => Ok(Loader::Json),
            "ndjson" | "jsonl" | "json_lines" => Ok(Loader::NdJson),
            "fwf" | "fixed_width" => Ok(Loader::FixedWidth),
            _ => Err(ConfigValidationError::UnknownLoader(s.to_string())),
        }
    }
}

/// Text encoding for the text based loaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TextEncoding {
    /// Strict UTF-8; invalid bytes fail the load
    #[default]
    Utf8,
    /// Invalid UTF-8 sequences are replaced
    LossyUtf8,
}

impl From<TextEncoding> for CsvEncoding {
    fn from(encoding: TextEncoding) -> Self {
        match encoding {
            TextEncoding::Utf8 => CsvEncoding::Utf8,
            TextEncoding::LossyUtf8 => CsvEncoding::LossyUtf8,
        }
    }
}

/// Arguments forwarded to the loader.
///
/// Unset fields keep the loader's own defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LoadOptions {
    /// Field separator (CSV/TSV). Must be a single ASCII character.
    pub separator: Option<char>,
    /// Whether the first line holds column names. Default: true
    pub has_header: Option<bool>,
    /// Number of leading lines to skip before the header.
    pub skip_rows: Option<usize>,
    /// Read at most this many data rows.
    pub n_rows: Option<usize>,
    /// Quote character (CSV/TSV). Must be ASCII.
    pub quote_char: Option<char>,
    /// Extra tokens read as missing.
    pub null_values: Vec<String>,
    /// Whether [`DEFAULT_NULL_VALUES`] are read as missing. Default: true
    pub keep_default_na: Option<bool>,
    /// Rows used for dtype inference (CSV/TSV). Default: every row
    pub infer_schema_length: Option<usize>,
    /// Text encoding.
    pub encoding: Option<TextEncoding>,
    /// Field widths in characters (fixed-width only).
    pub widths: Option<Vec<usize>>,
}

impl LoadOptions {
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = Some(separator);
        self
    }

    pub fn with_has_header(mut self, has_header: bool) -> Self {
        self.has_header = Some(has_header);
        self
    }

    pub fn with_skip_rows(mut self, skip_rows: usize) -> Self {
        self.skip_rows = Some(skip_rows);
        self
    }

    pub fn with_n_rows(mut self, n_rows: usize) -> Self {
        self.n_rows = Some(n_rows);
        self
    }

    pub fn with_quote_char(mut self, quote_char: char) -> Self {
        self.quote_char = Some(quote_char);
        self
    }

    pub fn with_null_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.null_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_keep_default_na(mut self, keep: bool) -> Self {
        self.keep_default_na = Some(keep);
        self
    }

    pub fn with_infer_schema_length(mut self, length: usize) -> Self {
        self.infer_schema_length = Some(length);
        self
    }

    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    pub fn with_widths(mut self, widths: Vec<usize>) -> Self {
        self.widths = Some(widths);
        self
    }

    /// Names of the options that are set.
    fn set_options(&self) -> Vec<&'static str> {
        let mut set = Vec::new();
        if self.separator.is_some() {
            set.push("separator");
        }
        if self.has_header.is_some() {
            set.push("has_header");
        }
        if self.skip_rows.is_some() {
            set.push("skip_rows");
        }
        if self.n_rows.is_some() {
            set.push("n_rows");
        }
        if self.quote_char.is_some() {
            set.push("quote_char");
        }
        if !self.null_values.is_empty() {
            set.push("null_values");
        }
        if self.keep_default_na.is_some() {
            set.push("keep_default_na");
        }
        if self.infer_schema_length.is_some() {
            set.push("infer_schema_length");
        }
        if self.encoding.is_some() {
            set.push("encoding");
        }
        if self.widths.is_some() {
            set.push("widths");
        }
        set
    }

    /// Check that every set option applies to `loader` and has a usable value.
    pub fn validate_for(&self, loader: Loader) -> std::result::Result<(), ConfigValidationError> {
        let supported = loader.supported_options();
        if let Some(option) = self
            .set_options()
            .into_iter()
            .find(|option| !supported.contains(option))
        {
            return Err(ConfigValidationError::UnsupportedOption {
                option: option.to_string(),
                loader,
            });
        }

        for (option, value) in [("separator", self.separator), ("quote_char", self.quote_char)] {
            if let Some(c) = value
                && !c.is_ascii()
            {
                return Err(ConfigValidationError::InvalidOption {
                    option: option.to_string(),
                    reason: format!("'{}' is not a single ASCII character", c),
                });
            }
        }

        if loader == Loader::FixedWidth {
            match &self.widths {
                None => {
                    return Err(ConfigValidationError::MissingOption {
                        option: "widths".to_string(),
                        loader,
                    });
                }
                Some(widths) if widths.is_empty() => {
                    return Err(ConfigValidationError::InvalidOption {
                        option: "widths".to_string(),
                        reason: "at least one field width is required".to_string(),
                    });
                }
                Some(widths) if widths.contains(&0) => {
                    return Err(ConfigValidationError::InvalidOption {
                        option: "widths".to_string(),
                        reason: "field widths must be positive".to_string(),
                    });
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    /// Missing-value tokens in effect for the text loaders.
    pub fn effective_null_values(&self) -> Vec<String> {
        let mut values: Vec<String> = if self.keep_default_na.unwrap_or(true) {
            DEFAULT_NULL_VALUES.iter().map(|s| s.to_string()).collect()
        } else {
            Vec::new()
        };
        for value in &self.null_values {
            if !values.contains(value) {
                values.push(value.clone());
            }
        }
        values
    }
}

/// Load a dataset with the given loader.
///
/// Every read or parse failure is reported as
/// [`DictionaryError::LoadFailed`] naming the dataset path.
pub fn load_dataset(path: &Path, loader: Loader, options: &LoadOptions) -> Result<DataFrame> {
    options.validate_for(loader)?;

    info!("Loading dataset from: {} ({})", path.display(), loader);

    let load_failed = |reason: String| DictionaryError::LoadFailed {
        path: path.display().to_string(),
        reason,
    };

    let df = match loader {
        Loader::Csv => read_delimited(path, b',', options),
        Loader::Tsv => read_delimited(path, b'\t', options),
        Loader::FixedWidth => read_fixed_width(path, options),
        Loader::Parquet => open(path).and_then(|file| Ok(ParquetReader::new(file).finish()?)),
        Loader::Ipc => open(path).and_then(|file| Ok(IpcReader::new(file).finish()?)),
        Loader::Json => open(path).and_then(|file| {
            Ok(JsonReader::new(file)
                .with_json_format(JsonFormat::Json)
                .finish()?)
        }),
        Loader::NdJson => open(path).and_then(|file| {
            Ok(JsonReader::new(file)
                .with_json_format(JsonFormat::JsonLines)
                .finish()?)
        }),
    }
    .map_err(|e| match e {
        DictionaryError::LoadFailed { .. } => e,
        other => load_failed(other.to_string()),
    })?;

    // The binary formats have no row limit of their own.
    let df = match (loader, options.n_rows) {
        (Loader::Parquet | Loader::Ipc | Loader::Json | Loader::NdJson, Some(n)) => {
            df.head(Some(n))
        }
        _ => df,
    };

    info!("Dataset loaded successfully: {:?}", df.shape());
    Ok(df)
}

fn open(path: &Path) -> Result<File> {
    Ok(File::open(path)?)
}

/// Read CSV-like text with polars.
fn read_delimited(path: &Path, default_separator: u8, options: &LoadOptions) -> Result<DataFrame> {
    let separator = options.separator.map(|c| c as u8).unwrap_or(default_separator);
    let quote_char = options.quote_char.map(|c| c as u8).unwrap_or(b'"');
    let null_values: Vec<PlSmallStr> = options
        .effective_null_values()
        .iter()
        .map(|s| s.as_str().into())
        .collect();

    debug!(
        "CSV options: separator={:?}, quote={:?}, {} null tokens",
        separator as char,
        quote_char as char,
        null_values.len()
    );

    let mut parse_options = CsvParseOptions::default()
        .with_separator(separator)
        .with_quote_char(Some(quote_char))
        .with_encoding(options.encoding.unwrap_or_default().into());
    if !null_values.is_empty() {
        parse_options = parse_options.with_null_values(Some(NullValues::AllColumns(null_values)));
    }

    let df = CsvReadOptions::default()
        .with_has_header(options.has_header.unwrap_or(true))
        .with_skip_rows(options.skip_rows.unwrap_or(0))
        .with_n_rows(options.n_rows)
        .with_infer_schema_length(options.infer_schema_length)
        .with_parse_options(parse_options)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str, suffix: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_loader_from_str() {
        assert_eq!("read_csv".parse::<Loader>().unwrap(), Loader::Csv);
        assert_eq!("CSV".parse::<Loader>().unwrap(), Loader::Csv);
        assert_eq!("read_table".parse::<Loader>().unwrap(), Loader::Tsv);
        assert_eq!("read_feather".parse::<Loader>().unwrap(), Loader::Ipc);
        assert_eq!("read_fwf".parse::<Loader>().unwrap(), Loader::FixedWidth);
        assert_eq!("jsonl".parse::<Loader>().unwrap(), Loader::NdJson);
    }

    #[test]
    fn test_loader_unknown_name() {
        let err = "read_nonexistent".parse::<Loader>().unwrap_err();
        assert!(matches!(err, ConfigValidationError::UnknownLoader(ref n) if n == "read_nonexistent"));
    }

    #[test]
    fn test_loader_names_round_trip() {
        for loader in Loader::ALL {
            assert_eq!(loader.name().parse::<Loader>().unwrap(), loader);
        }
    }

    #[test]
    fn test_validate_rejects_widths_for_csv() {
        let options = LoadOptions::default().with_widths(vec![3, 4]);
        let err = options.validate_for(Loader::Csv).unwrap_err();
        assert!(matches!(
            err,
            ConfigValidationError::UnsupportedOption { ref option, loader: Loader::Csv } if option == "widths"
        ));
    }

    #[test]
    fn test_validate_rejects_separator_for_parquet() {
        let options = LoadOptions::default().with_separator(';');
        assert!(options.validate_for(Loader::Parquet).is_err());
        assert!(options.validate_for(Loader::Csv).is_ok());
    }

    #[test]
    fn test_validate_fixed_width_requires_widths() {
        let err = LoadOptions::default()
            .validate_for(Loader::FixedWidth)
            .unwrap_err();
        assert!(matches!(err, ConfigValidationError::MissingOption { .. }));

        let err = LoadOptions::default()
            .with_widths(vec![2, 0])
            .validate_for(Loader::FixedWidth)
            .unwrap_err();
        assert!(matches!(err, ConfigValidationError::InvalidOption { .. }));
    }

    #[test]
    fn test_validate_non_ascii_separator() {
        let options = LoadOptions::default().with_separator('§');
        assert!(matches!(
            options.validate_for(Loader::Csv).unwrap_err(),
            ConfigValidationError::InvalidOption { .. }
        ));
    }

    #[test]
    fn test_effective_null_values() {
        let options = LoadOptions::default().with_null_values(["?", "NA"]);
        let values = options.effective_null_values();
        assert!(values.contains(&"?".to_string()));
        assert_eq!(values.iter().filter(|v| v.as_str() == "NA").count(), 1);

        let options = LoadOptions::default()
            .with_keep_default_na(false)
            .with_null_values(["?"]);
        assert_eq!(options.effective_null_values(), vec!["?".to_string()]);
    }

    #[test]
    fn test_load_csv() {
        let file = write_temp("colA,colB\n1,x\n,y\n3,x\n", ".csv");
        let df = load_dataset(file.path(), Loader::Csv, &LoadOptions::default()).unwrap();

        assert_eq!(df.shape(), (3, 2));
        assert_eq!(df.column("colA").unwrap().null_count(), 1);
        assert!(crate::utils::is_numeric_dtype(df.column("colA").unwrap().dtype()));
    }

    #[test]
    fn test_load_csv_null_tokens() {
        let file = write_temp("a,b\n1,NA\n2,?\n3,z\n", ".csv");
        let options = LoadOptions::default().with_null_values(["?"]);
        let df = load_dataset(file.path(), Loader::Csv, &options).unwrap();

        assert_eq!(df.column("b").unwrap().null_count(), 2);
    }

    #[test]
    fn test_load_csv_custom_separator_and_rows() {
        let file = write_temp("# comment\na;b\n1;2\n3;4\n5;6\n", ".csv");
        let options = LoadOptions::default()
            .with_separator(';')
            .with_skip_rows(1)
            .with_n_rows(2);
        let df = load_dataset(file.path(), Loader::Csv, &options).unwrap();

        assert_eq!(df.shape(), (2, 2));
    }

    #[test]
    fn test_load_tsv() {
        let file = write_temp("a\tb\n1\tx\n2\ty\n", ".tsv");
        let df = load_dataset(file.path(), Loader::Tsv, &LoadOptions::default()).unwrap();
        assert_eq!(df.shape(), (2, 2));
    }

    #[test]
    fn test_load_ndjson() {
        let file = write_temp("{\"a\": 1, \"b\": \"x\"}\n{\"a\": null, \"b\": \"y\"}\n", ".jsonl");
        let df = load_dataset(file.path(), Loader::NdJson, &LoadOptions::default()).unwrap();

        assert_eq!(df.shape(), (2, 2));
        assert_eq!(df.column("a").unwrap().null_count(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_dataset(
            Path::new("/definitely/not/here.csv"),
            Loader::Csv,
            &LoadOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, DictionaryError::LoadFailed { ref path, .. } if path.contains("here.csv")));
    }

    #[test]
    fn test_load_csv_late_text_value() {
        let mut contents = String::from("id,code\n");
        for i in 0..150 {
            contents.push_str(&format!("{},{}\n", i, i * 10));
        }
        contents.push_str("150,abc\n");
        let file = write_temp(&contents, ".csv");

        let df = load_dataset(file.path(), Loader::Csv, &LoadOptions::default()).unwrap();

        assert_eq!(df.shape(), (151, 2));
        assert_eq!(df.column("code").unwrap().dtype(), &DataType::String);
        assert!(crate::utils::is_numeric_dtype(df.column("id").unwrap().dtype()));
    }

    #[test]
    fn test_load_csv_late_decimal_value() {
        let mut contents = String::from("v\n");
        for i in 0..150 {
            contents.push_str(&format!("{}\n", i));
        }
        contents.push_str("1.5\n");
        let file = write_temp(&contents, ".csv");

        let df = load_dataset(file.path(), Loader::Csv, &LoadOptions::default()).unwrap();

        assert_eq!(df.height(), 151);
        assert_eq!(df.column("v").unwrap().dtype(), &DataType::Float64);
    }

    fn sample_frame() -> DataFrame {
        df!(
            "a" => &[Some(1i64), None, Some(3)],
            "b" => &["x", "y", "z"],
        )
        .unwrap()
    }

    #[test]
    fn test_load_parquet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.parquet");
        let mut df = sample_frame();
        ParquetWriter::new(File::create(&path).unwrap())
            .finish(&mut df)
            .unwrap();

        let loaded = load_dataset(&path, Loader::Parquet, &LoadOptions::default()).unwrap();
        assert_eq!(loaded.shape(), (3, 2));
        assert_eq!(loaded.column("a").unwrap().null_count(), 1);

        let limited = LoadOptions::default().with_n_rows(2);
        let loaded = load_dataset(&path, Loader::Parquet, &limited).unwrap();
        assert_eq!(loaded.shape(), (2, 2));
    }

    #[test]
    fn test_load_ipc() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.arrow");
        let mut df = sample_frame();
        IpcWriter::new(File::create(&path).unwrap())
            .finish(&mut df)
            .unwrap();

        let loaded = load_dataset(&path, Loader::Ipc, &LoadOptions::default()).unwrap();
        assert_eq!(loaded.shape(), (3, 2));
        assert_eq!(loaded.column("a").unwrap().null_count(), 1);
        assert_eq!(loaded.column("b").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_load_json_array() {
        let file = write_temp(
            "[{\"a\": 1, \"b\": \"x\"}, {\"a\": null, \"b\": \"y\"}, {\"a\": 3, \"b\": \"z\"}]",
            ".json",
        );

        let df = load_dataset(file.path(), Loader::Json, &LoadOptions::default()).unwrap();
        assert_eq!(df.shape(), (3, 2));
        assert_eq!(df.column("a").unwrap().null_count(), 1);
    }

    #[test]
    fn test_load_parquet_rejects_garbage() {
        let file = write_temp("this is not parquet", ".parquet");
        let err = load_dataset(file.path(), Loader::Parquet, &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, DictionaryError::LoadFailed { .. }));
    }
}
