use thiserror::Error;

/// Result alias for ledger operations.
pub type FinResult<T> = Result<T, FinError>;

/// Error type surfaced while reading a statement or building a report.
///
/// Row numbers count CSV data records from 1; truly empty lines are not records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FinError {
    #[error("row {row}: malformed {column} '{value}'")]
    MalformedRecord {
        row: usize,
        column: String,
        value: String,
    },
    #[error("row {row}: invalid amount in {column} '{value}'")]
    InvalidAmount {
        row: usize,
        column: String,
        value: String,
    },
    #[error("{bucket}: {column} total exceeds the supported amount range")]
    AmountOverflow { bucket: String, column: String },
    #[error("statement is missing required column '{column}'")]
    MissingColumn { column: String },
    #[error("internal: bucket {bucket} has no transactions")]
    EmptyBucket { bucket: String },
    #[error("internal: no closing snapshot for bucket {bucket}")]
    MissingSnapshot { bucket: String },
    #[error("csv error: {0}")]
    Csv(String),
    #[error("io error: {0}")]
    Io(String),
}

impl FinError {
    /// True for consistency violations between engine components.
    ///
    /// These are defects in the engine, never caused by user input.
    pub fn is_internal(&self) -> bool {
        matches!(self, FinError::EmptyBucket { .. } | FinError::MissingSnapshot { .. })
    }
}

impl From<std::io::Error> for FinError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}
