//! Plain-text inspection report
//!
//! Renders sheet names, the full table grid, column labels, shape and column
//! types in a fixed order. Output depends only on the loaded data, so
//! rendering the same workbook twice is byte-identical.

use crate::excel::bool_label;
use crate::types::{CellValue, Column, ColumnType, Table};
use chrono::{NaiveDateTime, Timelike};
use std::fmt;

/// Maximum decimals shown for floating point columns
const FLOAT_PRECISION: usize = 6;

/// Spaces between the grid's columns
const COLUMN_GAP: &str = "  ";

/// Minimum spaces between a label and its type in the data types section
const DTYPE_GAP: &str = "    ";

/// Everything the inspector learned about a workbook
#[derive(Debug, Clone)]
pub struct Report {
    pub sheet_names: Vec<String>,
    pub table: Table,
}

impl Report {
    pub fn new(sheet_names: Vec<String>, table: Table) -> Self {
        Self { sheet_names, table }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sheet names: {}", format_list(&self.sheet_names))?;
        writeln!(f)?;

        writeln!(f, "--- ALL DATA ---")?;
        writeln!(f, "{}", render_grid(&self.table))?;
        writeln!(f)?;

        writeln!(f, "--- Columns ---")?;
        writeln!(f, "{}", format_list(&self.table.column_labels()))?;
        writeln!(f)?;

        let (rows, columns) = self.table.shape();
        writeln!(f, "--- Shape ---")?;
        writeln!(f, "Rows: {}, Columns: {}", rows, columns)?;
        writeln!(f)?;

        writeln!(f, "--- Data Types ---")?;
        writeln!(f, "{}", render_dtypes(&self.table))
    }
}

//==============================================================================
// Lists
//==============================================================================

/// Render a list of strings as `['a', 'b']`
pub fn format_list<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| quote(s.as_ref())).collect();
    format!("[{}]", quoted.join(", "))
}

/// Single-quote a string, switching to double quotes when it contains only
/// single quotes
fn quote(s: &str) -> String {
    let delim = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(delim);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            c => push_escaped(&mut out, c),
        }
    }
    out.push(delim);
    out
}

/// Replace tabs and line breaks with their escape sequences so a value
/// always renders on one line
fn escape_control(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        push_escaped(&mut out, c);
    }
    out
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        c => out.push(c),
    }
}

//==============================================================================
// Table grid
//==============================================================================

/// Render the whole table: header line, then one line per row prefixed by
/// its zero-based index. Nothing is truncated.
pub fn render_grid(table: &Table) -> String {
    if table.column_count() == 0 {
        return String::new();
    }

    let rows = table.row_count();
    let labels: Vec<String> = table
        .columns()
        .iter()
        .map(|c| escape_control(&c.label))
        .collect();
    let cells: Vec<Vec<String>> = table.columns().iter().map(render_column).collect();
    let widths: Vec<usize> = labels
        .iter()
        .zip(&cells)
        .map(|(label, values)| {
            values
                .iter()
                .map(|v| display_width(v))
                .chain(std::iter::once(display_width(label)))
                .max()
                .unwrap_or(0)
        })
        .collect();

    // The index gutter only exists when there are rows to index
    let gutter = if rows > 0 {
        Some((rows - 1).to_string().len())
    } else {
        None
    };

    let mut lines = Vec::with_capacity(rows + 1);

    let mut header: Vec<String> = Vec::with_capacity(widths.len() + 1);
    if let Some(g) = gutter {
        header.push(" ".repeat(g));
    }
    for (label, width) in labels.iter().zip(&widths) {
        header.push(pad_left(label, *width));
    }
    lines.push(header.join(COLUMN_GAP));

    for row in 0..rows {
        let mut line: Vec<String> = Vec::with_capacity(widths.len() + 1);
        if let Some(g) = gutter {
            line.push(pad_right(&row.to_string(), g));
        }
        for (values, width) in cells.iter().zip(&widths) {
            line.push(pad_left(&values[row], *width));
        }
        lines.push(line.join(COLUMN_GAP));
    }

    lines.join("\n")
}

/// Render every cell of a column according to the column's type
fn render_column(column: &Column) -> Vec<String> {
    match column.dtype {
        ColumnType::Float64 => {
            let decimals = float_decimals(&column.values);
            column
                .values
                .iter()
                .map(|v| match v {
                    CellValue::Int(i) => format_float(*i as f64, decimals),
                    CellValue::Float(x) => format_float(*x, decimals),
                    _ => "NaN".to_string(),
                })
                .collect()
        }
        ColumnType::DateTime => {
            let date_only = column.values.iter().all(|v| match v {
                CellValue::DateTime(dt) => {
                    dt.num_seconds_from_midnight() == 0 && dt.nanosecond() == 0
                }
                _ => true,
            });
            column
                .values
                .iter()
                .map(|v| match v {
                    CellValue::DateTime(dt) if date_only => dt.format("%Y-%m-%d").to_string(),
                    CellValue::DateTime(dt) => format_datetime(dt),
                    _ => "NaT".to_string(),
                })
                .collect()
        }
        ColumnType::Int64 | ColumnType::Bool | ColumnType::Object => {
            column.values.iter().map(format_cell).collect()
        }
    }
}

/// Natural rendering of a single cell, independent of its column
fn format_cell(value: &CellValue) -> String {
    match value {
        CellValue::Missing => "NaN".to_string(),
        CellValue::Int(i) => i.to_string(),
        CellValue::Float(x) => format_float_natural(*x),
        CellValue::Bool(b) => bool_label(*b).to_string(),
        CellValue::Text(s) => escape_control(s),
        CellValue::DateTime(dt) => format_datetime(dt),
    }
}

fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Fewest decimals (1..=6) that show every value of a float column
fn float_decimals(values: &[CellValue]) -> usize {
    values
        .iter()
        .filter_map(|v| match v {
            CellValue::Float(x) if x.is_finite() => Some(significant_decimals(*x)),
            _ => None,
        })
        .max()
        .unwrap_or(0)
        .clamp(1, FLOAT_PRECISION)
}

/// Decimals left after rounding to the display precision and trimming zeros
fn significant_decimals(x: f64) -> usize {
    let fixed = format!("{:.*}", FLOAT_PRECISION, x);
    match fixed.split_once('.') {
        Some((_, frac)) => frac.trim_end_matches('0').len(),
        None => 0,
    }
}

/// Format a float with a fixed number of decimals
pub fn format_float(x: f64, decimals: usize) -> String {
    if x.is_nan() {
        "NaN".to_string()
    } else if x.is_infinite() {
        let s = if x > 0.0 { "inf" } else { "-inf" };
        s.to_string()
    } else {
        format!("{:.*}", decimals, x)
    }
}

/// Shortest float representation, always with a decimal point
fn format_float_natural(x: f64) -> String {
    if !x.is_finite() {
        return format_float(x, 0);
    }
    let s = x.to_string();
    if s.contains('.') {
        s
    } else {
        format!("{}.0", s)
    }
}

fn display_width(s: &str) -> usize {
    s.chars().count()
}

fn pad_left(s: &str, width: usize) -> String {
    format!("{:>width$}", s, width = width)
}

fn pad_right(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

//==============================================================================
// Data types
//==============================================================================

/// One `<label>    <type>` line per column, closed by `dtype: object`
pub fn render_dtypes(table: &Table) -> String {
    let dtypes: Vec<(String, ColumnType)> = table
        .dtypes()
        .into_iter()
        .map(|(label, dtype)| (escape_control(label), dtype))
        .collect();
    if dtypes.is_empty() {
        return "Series([], dtype: object)".to_string();
    }

    let label_width = dtypes
        .iter()
        .map(|(label, _)| display_width(label))
        .max()
        .unwrap_or(0);
    let type_width = dtypes
        .iter()
        .map(|(_, dtype)| dtype.type_name().len())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<String> = dtypes
        .iter()
        .map(|(label, dtype)| {
            format!(
                "{}{}{}",
                pad_right(label, label_width),
                DTYPE_GAP,
                pad_left(dtype.type_name(), type_width)
            )
        })
        .collect();
    lines.push("dtype: object".to_string());
    lines.join("\n")
}
