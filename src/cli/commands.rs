use crate::error::InspectResult;
use crate::excel::WorkbookLoader;
use crate::report::Report;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, info};

/// Workbook inspected when no path is given
pub const DEFAULT_FILE: &str = "Pricing_4_ZoneRates.xlsx";

/// Environment variable consulted when no path argument is given
pub const ENV_FILE: &str = "SHEET_INSPECT_FILE";

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

/// Open a workbook, list its sheets and load the first one.
///
/// The report is built completely before anything is printed, so a failure
/// at any step leaves no partial output behind.
pub fn inspect(file: &Path) -> InspectResult<Report> {
    let mut loader = WorkbookLoader::open(file)?;
    let sheet_names = loader.sheet_names();
    let table = loader.load_first_sheet()?;

    let (rows, columns) = table.shape();
    info!(
        file = %loader.path().display(),
        sheets = sheet_names.len(),
        rows,
        columns,
        "inspected workbook"
    );

    Ok(Report::new(sheet_names, table))
}

/// Execute the inspect command, writing the report or a single `Error:` line
/// to `out`. Returns the process exit status.
pub fn run<W: Write>(file: &Path, out: &mut W) -> io::Result<u8> {
    match inspect(file) {
        Ok(report) => {
            write!(out, "{}", report)?;
            out.flush()?;
            Ok(EXIT_SUCCESS)
        }
        Err(e) => {
            debug!(error = %e, "inspection failed");
            writeln!(out, "Error: {}", e)?;
            out.flush()?;
            Ok(EXIT_FAILURE)
        }
    }
}
