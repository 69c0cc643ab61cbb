//! sheet-inspect - print what is inside a spreadsheet
//!
//! Opens a workbook, lists its sheet names, loads the first sheet into a
//! [`Table`] and renders a plain-text report: the full grid, the column
//! labels, the shape and the inferred type of every column.
//!
//! # Example
//!
//! ```no_run
//! use sheet_inspect::cli::inspect;
//! use std::path::Path;
//!
//! let report = inspect(Path::new("rates.xlsx"))?;
//! println!("Rows: {}", report.table.row_count());
//! print!("{}", report);
//! # Ok::<(), sheet_inspect::error::InspectError>(())
//! ```

pub mod cli;
pub mod error;
pub mod excel;
pub mod report;
pub mod types;

// Re-export commonly used types
pub use error::{InspectError, InspectResult};
pub use report::Report;
pub use types::{CellValue, Column, ColumnType, Table};
