//! Workbook loader - spreadsheet file → sheet names + first-sheet Table

use crate::error::{InspectError, InspectResult};
use crate::types::{CellValue, Column, Table};
use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Largest magnitude at which every integral f64 is exactly representable
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

/// Read-only handle on an open spreadsheet document.
///
/// The underlying file is held for as long as the loader lives and is
/// released when it is dropped.
pub struct WorkbookLoader {
    path: PathBuf,
    workbook: Sheets<BufReader<File>>,
}

impl WorkbookLoader {
    /// Open a workbook, detecting the format from the file extension
    pub fn open<P: AsRef<Path>>(path: P) -> InspectResult<Self> {
        let path = path.as_ref().to_path_buf();
        debug!(path = %path.display(), "opening workbook");

        let workbook = open_workbook_auto(&path).map_err(|e| {
            debug!(error = %e, "failed to open workbook");
            InspectError::Document(format!("Failed to open {}: {}", path.display(), e))
        })?;

        Ok(Self { path, workbook })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> Vec<String> {
        let names = self.workbook.sheet_names();
        debug!(count = names.len(), "enumerated sheets");
        names
    }

    /// Load the first sheet (by position, not name) into a Table
    pub fn load_first_sheet(&mut self) -> InspectResult<Table> {
        let range = self
            .workbook
            .worksheet_range_at(0)
            .ok_or_else(|| {
                InspectError::Document(format!(
                    "{} contains no worksheets",
                    self.path.display()
                ))
            })?
            .map_err(|e| {
                debug!(error = %e, "failed to read first sheet");
                InspectError::Document(format!("Failed to read first sheet: {}", e))
            })?;

        let (height, width) = range.get_size();
        debug!(height, width, "loaded first sheet range");

        let table = table_from_range(&range)?;
        for (label, dtype) in table.dtypes() {
            debug!(column = label, dtype = %dtype, "inferred column type");
        }
        Ok(table)
    }
}

/// Build a Table from a sheet range: first row is the header, the rest is data.
///
/// Columns count from column A even when the range starts further right; the
/// unused leading columns load as unnamed, all-missing columns.
pub fn table_from_range(range: &Range<Data>) -> InspectResult<Table> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Table::default());
    };

    let leading = range.start().map_or(0, |(_, col)| col as usize);
    let header: Vec<Data> = std::iter::repeat(Data::Empty)
        .take(leading)
        .chain(header.iter().cloned())
        .collect();

    let labels = header_labels(&header);
    let data_rows = range.height().saturating_sub(1);
    let mut columns_data: Vec<Vec<CellValue>> = (0..labels.len())
        .map(|_| Vec::with_capacity(data_rows))
        .collect();

    // Range rows are always `width` long, so every column gets one value per row
    for row in rows {
        let (blank, used) = columns_data.split_at_mut(leading);
        for values in blank {
            values.push(CellValue::Missing);
        }
        for (values, cell) in used.iter_mut().zip(row) {
            values.push(convert_cell(cell));
        }
    }

    let columns = labels
        .into_iter()
        .zip(columns_data)
        .map(|(label, values)| Column::new(label, values))
        .collect();

    Table::new(columns)
}

/// Turn the header row into unique column labels.
///
/// Blank headers become `Unnamed: <index>`; repeated labels get `.1`, `.2`, ...
fn header_labels(header: &[Data]) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut next_suffix: HashMap<String, usize> = HashMap::new();
    let mut labels = Vec::with_capacity(header.len());

    for (idx, cell) in header.iter().enumerate() {
        let base = match cell {
            Data::Empty => format!("Unnamed: {}", idx),
            Data::String(s) if s.is_empty() => format!("Unnamed: {}", idx),
            Data::String(s) => s.clone(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) => match integral_float(*f) {
                Some(i) => i.to_string(),
                None => f.to_string(),
            },
            Data::Bool(b) => bool_label(*b).to_string(),
            other => other.to_string(),
        };

        let mut label = base.clone();
        if used.contains(&label) {
            let n = next_suffix.entry(base.clone()).or_insert(1);
            loop {
                label = format!("{}.{}", base, n);
                *n += 1;
                if !used.contains(&label) {
                    break;
                }
            }
        }
        used.insert(label.clone());
        labels.push(label);
    }

    labels
}

/// Convert a calamine cell to a CellValue
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Missing,
        Data::Int(i) => CellValue::Int(*i),
        // Spreadsheets store every number as a float
        Data::Float(f) => integral_float(*f).map_or(CellValue::Float(*f), CellValue::Int),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) if dt.is_duration() => {
            CellValue::Text(format_duration(dt.as_f64()))
        }
        Data::DateTime(dt) => dt
            .as_datetime()
            .map_or(CellValue::Float(dt.as_f64()), CellValue::DateTime),
        Data::DateTimeIso(s) => {
            parse_iso_datetime(s).map_or_else(|| CellValue::Text(s.clone()), CellValue::DateTime)
        }
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

fn integral_float(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT_INT {
        Some(f as i64)
    } else {
        None
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    s.parse::<NaiveDateTime>().ok().or_else(|| {
        s.parse::<NaiveDate>()
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    })
}

/// Format a duration given in (fractional) days as `HH:MM:SS`
fn format_duration(days: f64) -> String {
    let secs = (days * 86_400.0).round() as i64;
    let sign = if secs < 0 { "-" } else { "" };
    let secs = secs.abs();
    format!(
        "{}{:02}:{:02}:{:02}",
        sign,
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

pub(crate) fn bool_label(b: bool) -> &'static str {
    if b {
        "True"
    } else {
        "False"
    }
}
