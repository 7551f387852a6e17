//! Configuration types for data dictionary generation.
//!
//! This module provides the call-time options using the builder pattern.
//! Every [`DictionaryConfig`] owns its own float formatter; there is no
//! shared default instance.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::loader::{LoadOptions, Loader};

/// Which columns participate in summarization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Include {
    /// Summarize every column type-appropriately
    #[default]
    All,
    /// Only numeric columns (integers and floats)
    Numeric,
    /// Only non-numeric columns (strings, booleans, dates, ...)
    Categorical,
}

impl Include {
    /// Canonical selector name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Include::All => "all",
            Include::Numeric => "numeric",
            Include::Categorical => "categorical",
        }
    }
}

impl fmt::Display for Include {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Include {
    type Err = ConfigValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Include::All),
            "number" | "numeric" => Ok(Include::Numeric),
            "object" | "categorical" | "category" => Ok(Include::Categorical),
            _ => Err(ConfigValidationError::InvalidInclude(s.to_string())),
        }
    }
}

/// Renders floating point cells of the dictionary table.
///
/// Wraps an arbitrary `f64 -> String` function. The default renders two
/// decimal digits.
#[derive(Clone)]
pub struct FloatFormatter(Arc<dyn Fn(f64) -> String + Send + Sync>);

impl FloatFormatter {
    /// Wrap a custom formatting function.
    pub fn new<F>(format: F) -> Self
    where
        F: Fn(f64) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(format))
    }

    /// Fixed-point formatting with `precision` decimal digits.
    pub fn fixed(precision: usize) -> Self {
        Self::new(move |value| format!("{:.*}", precision, value))
    }

    /// Format a single value.
    pub fn format(&self, value: f64) -> String {
        (self.0)(value)
    }
}

impl Default for FloatFormatter {
    fn default() -> Self {
        Self::fixed(2)
    }
}

impl fmt::Debug for FloatFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FloatFormatter({})", self.format(1.0 / 3.0))
    }
}

/// Default placeholder for absent cells.
pub const DEFAULT_NA_REP: &str = "-";

/// Configuration for one dictionary generation run.
///
/// Use [`DictionaryConfig::builder()`] to create a configuration with the
/// fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use lex_dictionary::config::{DictionaryConfig, Include};
/// use lex_dictionary::loader::Loader;
///
/// let config = DictionaryConfig::builder()
///     .include(Include::Numeric)
///     .loader(Loader::Tsv)
///     .float_precision(3)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryConfig {
    /// Column selector.
    /// Default: All
    pub include: Include,

    /// Loading strategy for the dataset file.
    /// Default: Csv
    pub loader: Loader,

    /// Arguments forwarded to the loader.
    pub load_options: LoadOptions,

    /// Formatter applied to every float cell of the rendered table.
    /// Not serialized; deserialized configs get the default formatter.
    /// Default: two decimal digits
    #[serde(skip)]
    pub float_format: FloatFormatter,

    /// Placeholder for absent cells in the rendered table.
    /// Default: "-"
    pub na_rep: String,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            include: Include::default(),
            loader: Loader::default(),
            load_options: LoadOptions::default(),
            float_format: FloatFormatter::default(),
            na_rep: DEFAULT_NA_REP.to_string(),
        }
    }
}

impl DictionaryConfig {
    /// Create a new configuration builder.
    pub fn builder() -> DictionaryConfigBuilder {
        DictionaryConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.na_rep.is_empty() {
            return Err(ConfigValidationError::EmptyNaRep);
        }

        self.load_options.validate_for(self.loader)
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Unknown reader '{0}'")]
    UnknownLoader(String),

    #[error("Invalid include selector '{0}' (expected 'all', 'numeric' or 'categorical')")]
    InvalidInclude(String),

    #[error("Missing-value placeholder must not be empty")]
    EmptyNaRep,

    #[error("Option '{option}' is not supported by the {loader} reader")]
    UnsupportedOption { option: String, loader: Loader },

    #[error("Option '{option}' is required by the {loader} reader")]
    MissingOption { option: String, loader: Loader },

    #[error("Invalid value for '{option}': {reason}")]
    InvalidOption { option: String, reason: String },
}

/// Builder for [`DictionaryConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct DictionaryConfigBuilder {
    include: Option<Include>,
    include_name: Option<String>,
    loader: Option<Loader>,
    loader_name: Option<String>,
    load_options: Option<LoadOptions>,
    float_format: Option<FloatFormatter>,
    na_rep: Option<String>,
}

impl DictionaryConfigBuilder {
    /// Set the column selector.
    pub fn include(mut self, include: Include) -> Self {
        self.include = Some(include);
        self.include_name = None;
        self
    }

    /// Set the column selector by name (`"all"`, `"numeric"`, `"categorical"`).
    ///
    /// The name is resolved in [`build`](Self::build).
    pub fn include_name(mut self, name: impl Into<String>) -> Self {
        self.include_name = Some(name.into());
        self.include = None;
        self
    }

    /// Set the loader.
    pub fn loader(mut self, loader: Loader) -> Self {
        self.loader = Some(loader);
        self.loader_name = None;
        self
    }

    /// Set the loader by name (e.g. `"read_csv"`, `"parquet"`).
    ///
    /// The name is resolved in [`build`](Self::build); unknown names fail with
    /// [`ConfigValidationError::UnknownLoader`].
    pub fn loader_name(mut self, name: impl Into<String>) -> Self {
        self.loader_name = Some(name.into());
        self.loader = None;
        self
    }

    /// Set the options forwarded to the loader.
    pub fn load_options(mut self, options: LoadOptions) -> Self {
        self.load_options = Some(options);
        self
    }

    /// Set a custom float formatter.
    pub fn float_format(mut self, formatter: FloatFormatter) -> Self {
        self.float_format = Some(formatter);
        self
    }

    /// Use fixed-point float formatting with the given number of decimals.
    pub fn float_precision(mut self, precision: usize) -> Self {
        self.float_format = Some(FloatFormatter::fixed(precision));
        self
    }

    /// Set the placeholder for absent cells.
    pub fn na_rep(mut self, na_rep: impl Into<String>) -> Self {
        self.na_rep = Some(na_rep.into());
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `DictionaryConfig` or an error if validation fails.
    pub fn build(self) -> Result<DictionaryConfig, ConfigValidationError> {
        let include = match self.include_name {
            Some(name) => name.parse()?,
            None => self.include.unwrap_or_default(),
        };

        let loader = match self.loader_name {
            Some(name) => name.parse()?,
            None => self.loader.unwrap_or_default(),
        };

        let config = DictionaryConfig {
            include,
            loader,
            load_options: self.load_options.unwrap_or_default(),
            float_format: self.float_format.unwrap_or_default(),
            na_rep: self.na_rep.unwrap_or_else(|| DEFAULT_NA_REP.to_string()),
        };

        config.validate()?;
        Ok(config)
    }
}
