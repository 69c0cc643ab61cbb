use thiserror::Error;

pub type InspectResult<T> = Result<T, InspectError>;

#[derive(Error, Debug)]
pub enum InspectError {
    /// Opening, enumerating or parsing the spreadsheet failed.
    #[error("{0}")]
    Document(String),

    #[error("Invalid table: {0}")]
    InvalidTable(String),
}
