//! Plain-text rendering of a [`SummaryTable`].
//!
//! One header row of statistic labels, then one row per column. The index
//! (column name) is left-aligned; every other cell is right-aligned and cells
//! are separated by two spaces. Statistic columns only appear when at least
//! one summarized column has them.

use crate::config::FloatFormatter;
use crate::types::{ColumnSummary, SummaryTable};

const CELL_SEPARATOR: &str = "  ";

/// Statistic columns of the rendered table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stat {
    Count,
    Unique,
    Top,
    Freq,
    Mean,
    Std,
    Min,
    Q25,
    Median,
    Q75,
    Max,
    Missing,
    MissingPercent,
}

impl Stat {
    fn label(&self) -> &'static str {
        match self {
            Stat::Count => "count",
            Stat::Unique => "unique",
            Stat::Top => "top",
            Stat::Freq => "freq",
            Stat::Mean => "mean",
            Stat::Std => "std",
            Stat::Min => "min",
            Stat::Q25 => "25%",
            Stat::Median => "50%",
            Stat::Q75 => "75%",
            Stat::Max => "max",
            Stat::Missing => "Missing",
            Stat::MissingPercent => "%Missing",
        }
    }

    /// Columns shown for a table.
    fn columns_for(table: &SummaryTable) -> Vec<Stat> {
        let mut stats = vec![Stat::Count];
        if table.has_categorical() {
            stats.extend([Stat::Unique, Stat::Top, Stat::Freq]);
        }
        if table.has_numeric() {
            stats.extend([
                Stat::Mean,
                Stat::Std,
                Stat::Min,
                Stat::Q25,
                Stat::Median,
                Stat::Q75,
                Stat::Max,
            ]);
        }
        stats.extend([Stat::Missing, Stat::MissingPercent]);
        stats
    }
}

/// Single cell value before formatting.
enum Cell {
    Int(usize),
    Float(f64),
    Text(String),
    Absent,
}

fn cell(stat: Stat, column: &ColumnSummary) -> Cell {
    let float = |value: Option<f64>| value.map_or(Cell::Absent, Cell::Float);
    let numeric = column.numeric();
    let categorical = column.categorical();

    match stat {
        Stat::Count => Cell::Int(column.count),
        Stat::Unique => categorical.map_or(Cell::Absent, |s| Cell::Int(s.unique)),
        Stat::Top => categorical
            .and_then(|s| s.top.clone())
            .map_or(Cell::Absent, Cell::Text),
        Stat::Freq => categorical
            .and_then(|s| s.freq)
            .map_or(Cell::Absent, Cell::Int),
        Stat::Mean => float(numeric.and_then(|s| s.mean)),
        Stat::Std => float(numeric.and_then(|s| s.std)),
        Stat::Min => float(numeric.and_then(|s| s.min)),
        Stat::Q25 => float(numeric.and_then(|s| s.q25)),
        Stat::Median => float(numeric.and_then(|s| s.median)),
        Stat::Q75 => float(numeric.and_then(|s| s.q75)),
        Stat::Max => float(numeric.and_then(|s| s.max)),
        Stat::Missing => Cell::Int(column.missing),
        Stat::MissingPercent => Cell::Float(column.missing_percent),
    }
}

fn format_cell(cell: Cell, float_format: &FloatFormatter, na_rep: &str) -> String {
    match cell {
        Cell::Int(value) => value.to_string(),
        Cell::Float(value) if value.is_nan() => na_rep.to_string(),
        Cell::Float(value) => float_format.format(value),
        Cell::Text(value) => value,
        Cell::Absent => na_rep.to_string(),
    }
}

/// Render the table as aligned plain text (no trailing newline).
pub fn render_table(table: &SummaryTable, float_format: &FloatFormatter, na_rep: &str) -> String {
    let stats = Stat::columns_for(table);

    let rows: Vec<Vec<String>> = table
        .iter()
        .map(|column| {
            stats
                .iter()
                .map(|&stat| format_cell(cell(stat, column), float_format, na_rep))
                .collect()
        })
        .collect();

    let index_width = table
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0);

    let widths: Vec<usize> = stats
        .iter()
        .enumerate()
        .map(|(idx, stat)| {
            rows.iter()
                .map(|row| row[idx].chars().count())
                .chain(std::iter::once(stat.label().len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);

    let mut header = format!("{:<width$}", "", width = index_width);
    for (stat, width) in stats.iter().zip(&widths) {
        header.push_str(CELL_SEPARATOR);
        header.push_str(&format!("{:>width$}", stat.label(), width = *width));
    }
    lines.push(header);

    for (column, row) in table.iter().zip(&rows) {
        let mut line = format!("{:<width$}", column.name, width = index_width);
        for (value, width) in row.iter().zip(&widths) {
            line.push_str(CELL_SEPARATOR);
            line.push_str(&format!("{:>width$}", value, width = *width));
        }
        lines.push(line);
    }

    lines.join("\n")
}
