//! CLI entry point for the data dictionary generator.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use lex_dictionary::{
    DictionaryConfig, DictionaryGenerator, Include, LoadOptions, SummaryTable, dictionary_path,
};
use tracing::{error, info};

/// CLI-compatible column selector enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliInclude {
    /// Summarize every column
    All,
    /// Only numeric columns
    Numeric,
    /// Only non-numeric columns
    Categorical,
}

impl From<CliInclude> for Include {
    fn from(cli: CliInclude) -> Self {
        match cli {
            CliInclude::All => Include::All,
            CliInclude::Numeric => Include::Numeric,
            CliInclude::Categorical => Include::Categorical,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    author = "Lex Machina Team",
    version,
    about = "Data dictionary generator",
    long_about = "Writes a plain-text data dictionary next to a dataset file.\n\n\
                  The report is saved as <input>.txt and lists count, mean, std,\n\
                  quartiles, distinct values and missing values for every column.\n\n\
                  EXAMPLES:\n  \
                  # CSV file with a short description\n  \
                  lex-dictionary -i data.csv -s \"Survey results, 2024\"\n\n  \
                  # Numeric columns of a TSV file, three decimals\n  \
                  lex-dictionary -i data.tsv --loader read_table --include numeric --precision 3\n\n  \
                  # Print the summary table as JSON\n  \
                  lex-dictionary -i data.parquet --loader parquet --json"
)]
struct Args {
    /// Path to the dataset file
    #[arg(short, long)]
    input: String,

    /// Free-form description written into the report
    #[arg(short, long, default_value = "", conflicts_with = "summary_file")]
    summary: String,

    /// Read the description from a file
    #[arg(long)]
    summary_file: Option<String>,

    /// Columns to summarize
    #[arg(long, value_enum, default_value = "all")]
    include: CliInclude,

    /// Reader used to load the dataset
    ///
    /// One of read_csv, read_table, read_parquet, read_ipc, read_json,
    /// read_ndjson, read_fwf (the "read_" prefix is optional)
    #[arg(long, default_value = "read_csv")]
    loader: String,

    /// Field separator for delimited text
    #[arg(long)]
    separator: Option<char>,

    /// The first line holds data, not column names
    #[arg(long)]
    no_header: bool,

    /// Lines to skip before the header
    #[arg(long)]
    skip_rows: Option<usize>,

    /// Extra token read as missing (repeatable)
    #[arg(long = "null-value")]
    null_values: Vec<String>,

    /// Field widths for fixed-width files, comma separated
    #[arg(long, value_delimiter = ',')]
    widths: Option<Vec<usize>>,

    /// Decimal digits of float cells
    #[arg(long, default_value = "2")]
    precision: usize,

    /// Placeholder for statistics that do not apply to a column
    #[arg(long, default_value = "-")]
    na_rep: String,

    /// Output the summary table as JSON to stdout
    ///
    /// Disables all logs; the report file is still written as text.
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let summary = match args.summary_file {
        Some(ref path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read summary file: {}", path))?,
        None => args.summary.clone(),
    };

    let config = build_config(&args)?;
    let generator = DictionaryGenerator::new(config);

    let table = match generator.generate(&args.input, &summary) {
        Ok(table) => table,
        Err(e) => {
            error!("Data dictionary failed: {}", e);
            return Err(anyhow!("Data dictionary failed: {}", e));
        }
    };

    let output_path = dictionary_path(std::path::Path::new(&args.input));
    info!("Data dictionary written to: {}", output_path.display());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    print_human_readable_summary(&table, &args.input, &output_path.display().to_string());
    Ok(())
}

/// Translate CLI flags into a validated configuration.
fn build_config(args: &Args) -> Result<DictionaryConfig> {
    let mut options = LoadOptions::default();
    if let Some(separator) = args.separator {
        options = options.with_separator(separator);
    }
    if args.no_header {
        options = options.with_has_header(false);
    }
    if let Some(skip_rows) = args.skip_rows {
        options = options.with_skip_rows(skip_rows);
    }
    if !args.null_values.is_empty() {
        options = options.with_null_values(args.null_values.iter().cloned());
    }
    if let Some(ref widths) = args.widths {
        options = options.with_widths(widths.clone());
    }

    let config = DictionaryConfig::builder()
        .include(args.include.into())
        .loader_name(&args.loader)
        .load_options(options)
        .float_precision(args.precision)
        .na_rep(&args.na_rep)
        .build()?;

    Ok(config)
}

/// Print a short overview of the generated dictionary.
fn print_human_readable_summary(table: &SummaryTable, input: &str, output: &str) {
    println!();
    println!("{}", "=".repeat(60));
    println!("DATA DICTIONARY COMPLETE");
    println!("{}", "=".repeat(60));
    println!();
    println!(
        "Input:  {} ({} rows x {} columns)",
        input, table.row_count, table.column_count
    );
    println!("Output: {}", output);
    println!();

    println!("{:<24} {:<12} {:>8} {:>10}", "Column", "Type", "Missing", "%Missing");
    println!("{}", "-".repeat(57));
    for column in table.iter() {
        println!(
            "{:<24} {:<12} {:>8} {:>10.2}",
            truncate_str(&column.name, 23),
            column.dtype,
            column.missing,
            column.missing_percent
        );
    }
    println!();
    println!("Use --json for machine-readable output");
    println!("{}", "=".repeat(60));
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
