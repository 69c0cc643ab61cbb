//! Spreadsheet reading module
//!
//! Opens a workbook (.xlsx, .xlsm, .xlsb, .xls, .ods), lists its sheets and
//! loads the first sheet into a [`Table`](crate::types::Table).

mod loader;

pub(crate) use loader::bool_label;
pub use loader::{table_from_range, WorkbookLoader};
