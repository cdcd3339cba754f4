use thiserror::Error;

/// A row-scoped failure. The row is skipped and processing continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("missing fields: {}", .columns.join(", "))]
    MissingField { columns: Vec<String> },

    #[error("Unrecognized HLA format: {value}")]
    UnrecognizedHla { value: String },
}
