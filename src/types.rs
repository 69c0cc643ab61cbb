use crate::error::{InspectError, InspectResult};
use chrono::NaiveDateTime;
use std::fmt;

//==============================================================================
// Cell Values
//==============================================================================

/// A single cell of a loaded sheet
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Empty cell (kept as an explicit marker so rows stay rectangular)
    Missing,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    DateTime(NaiveDateTime),
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

//==============================================================================
// Column Types
//==============================================================================

/// Semantic type of a column, inferred from the values it holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int64,
    Float64,
    Bool,
    DateTime,
    /// Text or heterogeneous values
    Object,
}

impl ColumnType {
    /// Infer the type of a column from its cells.
    ///
    /// Missing cells force integer columns to floating point and boolean
    /// columns to object, since neither can hold a missing marker. A column
    /// with no values at all is floating point.
    pub fn infer(values: &[CellValue]) -> Self {
        let has_missing = values.iter().any(CellValue::is_missing);
        let mut ints = 0usize;
        let mut floats = 0usize;
        let mut bools = 0usize;
        let mut dates = 0usize;

        for value in values {
            match value {
                CellValue::Missing => {}
                CellValue::Int(_) => ints += 1,
                CellValue::Float(_) => floats += 1,
                CellValue::Bool(_) => bools += 1,
                CellValue::DateTime(_) => dates += 1,
                CellValue::Text(_) => return ColumnType::Object,
            }
        }

        let numbers = ints + floats;
        let kinds = [numbers, bools, dates].iter().filter(|n| **n > 0).count();

        match kinds {
            0 => ColumnType::Float64,
            1 if numbers > 0 => {
                if floats > 0 || has_missing {
                    ColumnType::Float64
                } else {
                    ColumnType::Int64
                }
            }
            1 if bools > 0 => {
                if has_missing {
                    ColumnType::Object
                } else {
                    ColumnType::Bool
                }
            }
            1 => ColumnType::DateTime,
            _ => ColumnType::Object,
        }
    }

    /// Get the type name as printed in the report
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnType::Int64 => "int64",
            ColumnType::Float64 => "float64",
            ColumnType::Bool => "bool",
            ColumnType::DateTime => "datetime64[ns]",
            ColumnType::Object => "object",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

//==============================================================================
// Table
//==============================================================================

/// A labelled column of a table
#[derive(Debug, Clone)]
pub struct Column {
    pub label: String,
    pub values: Vec<CellValue>,
    pub dtype: ColumnType,
}

impl Column {
    pub fn new(label: String, values: Vec<CellValue>) -> Self {
        let dtype = ColumnType::infer(&values);
        Self {
            label,
            values,
            dtype,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// In-memory rows and columns of one sheet. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table from columns in sheet order.
    ///
    /// Fails if the columns do not all have the same number of rows.
    pub fn new(columns: Vec<Column>) -> InspectResult<Self> {
        let table = Self { columns };
        table.validate_lengths()?;
        Ok(table)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    pub fn dtypes(&self) -> Vec<(&str, ColumnType)> {
        self.columns
            .iter()
            .map(|c| (c.label.as_str(), c.dtype))
            .collect()
    }

    /// Get the number of rows (length of first column, all are the same)
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |col| col.len())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    fn validate_lengths(&self) -> InspectResult<()> {
        let row_count = self.row_count();
        for column in &self.columns {
            if column.len() != row_count {
                return Err(InspectError::InvalidTable(format!(
                    "Column '{}' has {} rows, expected {} rows",
                    column.label,
                    column.len(),
                    row_count
                )));
            }
        }
        Ok(())
    }
}
