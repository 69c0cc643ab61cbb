//! Workbook inspection tests
//!
//! Fixture workbooks are written with rust_xlsxwriter into temp dirs, then
//! read back through the public inspect API.

use pretty_assertions::assert_eq;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use sheet_inspect::cli::inspect;
use sheet_inspect::excel::WorkbookLoader;
use sheet_inspect::{CellValue, ColumnType, InspectError};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ═══════════════════════════════════════════════════════════════════════════
// FIXTURES
// ═══════════════════════════════════════════════════════════════════════════

/// Two sheets: "Rates" (3 columns x 5 rows) and "Notes"
fn write_rates_workbook(dir: &Path) -> PathBuf {
    let path = dir.join("rates.xlsx");
    let mut workbook = Workbook::new();

    let rates = workbook.add_worksheet();
    rates.set_name("Rates").unwrap();
    rates.write_string(0, 0, "Zone").unwrap();
    rates.write_string(0, 1, "Rate").unwrap();
    rates.write_string(0, 2, "Region").unwrap();
    let data = [
        (1.0, 10.5, "North"),
        (2.0, 12.0, "South"),
        (3.0, 15.25, "East"),
        (4.0, 9.0, "West"),
        (5.0, 20.0, "Central"),
    ];
    for (i, (zone, rate, region)) in data.iter().enumerate() {
        let row = i as u32 + 1;
        rates.write_number(row, 0, *zone).unwrap();
        rates.write_number(row, 1, *rate).unwrap();
        rates.write_string(row, 2, *region).unwrap();
    }

    let notes = workbook.add_worksheet();
    notes.set_name("Notes").unwrap();
    notes.write_string(0, 0, "Rates are per kg").unwrap();

    workbook.save(&path).unwrap();
    path
}

/// One sheet exercising every inferred column type
fn write_typed_workbook(dir: &Path) -> PathBuf {
    let path = dir.join("typed.xlsx");
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    let sheet = workbook.add_worksheet();
    sheet.set_name("Data").unwrap();
    for (col, label) in ["count", "partial", "label", "flag", "when"]
        .iter()
        .enumerate()
    {
        sheet.write_string(0, col as u16, *label).unwrap();
    }

    for row in 1..=3u32 {
        sheet.write_number(row, 0, row as f64 * 10.0).unwrap();
        // "partial" is missing on row 2
        if row != 2 {
            sheet.write_number(row, 1, row as f64).unwrap();
        }
        sheet.write_boolean(row, 3, row % 2 == 1).unwrap();
        let date = ExcelDateTime::from_ymd(2024, 1, row as u8).unwrap();
        sheet
            .write_datetime_with_format(row, 4, &date, &date_format)
            .unwrap();
    }
    sheet.write_number(1, 2, 7).unwrap();
    sheet.write_string(2, 2, "seven").unwrap();
    sheet.write_number(3, 2, 7.5).unwrap();

    workbook.save(&path).unwrap();
    path
}

fn write_header_only_workbook(dir: &Path) -> PathBuf {
    let path = dir.join("header_only.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Zone").unwrap();
    sheet.write_string(0, 1, "Rate").unwrap();
    workbook.save(&path).unwrap();
    path
}

fn section<'a>(report: &'a str, title: &str) -> Vec<&'a str> {
    report
        .split("\n\n")
        .find(|block| block.starts_with(title))
        .unwrap_or_else(|| panic!("missing section {}", title))
        .lines()
        .skip(1)
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// REPORT CONTENT
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_rates_workbook_full_report() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_rates_workbook(temp_dir.path());

    let report = inspect(&path).unwrap().to_string();

    let expected = "\
Sheet names: ['Rates', 'Notes']

--- ALL DATA ---
   Zone   Rate   Region
0     1  10.50    North
1     2  12.00    South
2     3  15.25     East
3     4   9.00     West
4     5  20.00  Central

--- Columns ---
['Zone', 'Rate', 'Region']

--- Shape ---
Rows: 5, Columns: 3

--- Data Types ---
Zone        int64
Rate      float64
Region     object
dtype: object
";
    assert_eq!(report, expected);
}

#[test]
fn test_rates_workbook_shape_and_sheet_order() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_rates_workbook(temp_dir.path());

    let report = inspect(&path).unwrap();

    assert_eq!(report.sheet_names, vec!["Rates", "Notes"]);
    assert_eq!(report.table.shape(), (5, 3));
    assert!(report.to_string().contains("Rows: 5, Columns: 3"));
}

#[test]
fn test_column_types_inferred_from_values() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_typed_workbook(temp_dir.path());

    let report = inspect(&path).unwrap();

    assert_eq!(
        report.table.dtypes(),
        vec![
            ("count", ColumnType::Int64),
            ("partial", ColumnType::Float64),
            ("label", ColumnType::Object),
            ("flag", ColumnType::Bool),
            ("when", ColumnType::DateTime),
        ]
    );

    let dtypes = section(&report.to_string(), "--- Data Types ---").join("\n");
    assert_eq!(
        dtypes,
        "\
count               int64
partial           float64
label              object
flag                 bool
when       datetime64[ns]
dtype: object"
    );
}

#[test]
fn test_missing_cell_is_explicit_and_rendered_nan() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_typed_workbook(temp_dir.path());

    let report = inspect(&path).unwrap();
    let partial = &report.table.columns()[1];

    assert_eq!(partial.len(), 3);
    assert_eq!(partial.values[1], CellValue::Missing);

    let rendered = report.to_string();
    let grid = section(&rendered, "--- ALL DATA ---");
    assert!(grid[2].contains("NaN"), "row 1 should show NaN: {}", grid[2]);
    assert!(grid[1].contains("2024-01-01"));
    assert!(grid[1].contains("True"));
}

#[test]
fn test_header_only_sheet() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_header_only_workbook(temp_dir.path());

    let report = inspect(&path).unwrap().to_string();

    assert_eq!(section(&report, "--- ALL DATA ---"), vec!["Zone  Rate"]);
    assert_eq!(section(&report, "--- Shape ---"), vec!["Rows: 0, Columns: 2"]);
}

#[test]
fn test_columns_match_grid_header() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_rates_workbook(temp_dir.path());

    let report = inspect(&path).unwrap();
    let rendered = report.to_string();

    let grid_header: Vec<&str> = section(&rendered, "--- ALL DATA ---")[0]
        .split_whitespace()
        .collect();
    assert_eq!(grid_header, report.table.column_labels());
    assert_eq!(
        section(&rendered, "--- Columns ---"),
        vec!["['Zone', 'Rate', 'Region']"]
    );
}

#[test]
fn test_inspection_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_typed_workbook(temp_dir.path());

    let first = inspect(&path).unwrap().to_string();
    let second = inspect(&path).unwrap().to_string();
    assert_eq!(first, second);
}

#[test]
fn test_unnamed_and_duplicate_headers() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("headers.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "rate").unwrap();
    sheet.write_string(0, 2, "rate").unwrap();
    for col in 0..3u16 {
        sheet.write_number(1, col, col as f64).unwrap();
    }
    workbook.save(&path).unwrap();

    let report = inspect(&path).unwrap();
    assert_eq!(
        report.table.column_labels(),
        vec!["rate", "Unnamed: 1", "rate.1"]
    );
}

#[test]
fn test_sheet_starting_at_column_b_keeps_column_a() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("offset.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 1, "Zone").unwrap();
    sheet.write_string(0, 2, "Rate").unwrap();
    for row in 1..=3u32 {
        sheet.write_number(row, 1, row as f64).unwrap();
        sheet.write_number(row, 2, row as f64 * 2.5).unwrap();
    }
    workbook.save(&path).unwrap();

    let report = inspect(&path).unwrap();
    let rendered = report.to_string();

    assert_eq!(
        report.table.column_labels(),
        vec!["Unnamed: 0", "Zone", "Rate"]
    );
    assert_eq!(report.table.dtypes()[0], ("Unnamed: 0", ColumnType::Float64));
    assert_eq!(section(&rendered, "--- Shape ---"), vec!["Rows: 3, Columns: 3"]);
    assert!(section(&rendered, "--- ALL DATA ---")[1].contains("NaN"));
}

// ═══════════════════════════════════════════════════════════════════════════
// LOADER
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_loader_lists_sheets_and_loads_first_by_position() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_rates_workbook(temp_dir.path());

    let mut loader = WorkbookLoader::open(&path).unwrap();
    assert_eq!(loader.path(), path.as_path());
    assert_eq!(loader.sheet_names(), vec!["Rates", "Notes"]);

    let table = loader.load_first_sheet().unwrap();
    assert_eq!(table.column_labels(), vec!["Zone", "Rate", "Region"]);
    assert_eq!(table.columns()[0].values[0], CellValue::Int(1));
    assert_eq!(table.columns()[1].values[0], CellValue::Float(10.5));
}

// ═══════════════════════════════════════════════════════════════════════════
// ERRORS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_nonexistent_file_is_document_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nope.xlsx");

    let err = inspect(&path).unwrap_err();
    assert!(matches!(err, InspectError::Document(_)));
    assert!(err.to_string().contains("nope.xlsx"));
}

#[test]
fn test_corrupt_file_is_document_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("corrupt.xlsx");
    std::fs::write(&path, "Zone,Rate\n1,10.5\n").unwrap();

    let err = inspect(&path).unwrap_err();
    assert!(matches!(err, InspectError::Document(_)));
}
