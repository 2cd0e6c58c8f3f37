use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Coarse classification of a [`QueryError`].
///
/// Callers that only care about "what went wrong" (rather than the exact variant) should match on
/// this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The tabular source could not be located, opened or read.
    MissingResource,
    /// The source (or an argument) failed a structural expectation.
    Format,
    /// A column name was empty or absent from the header.
    Schema,
}

/// Error type returned by validation and every aggregation operation.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The source could not be opened or read (e.g. file not found, permission denied).
    #[error("cannot read source '{}': {source}", path.display())]
    MissingResource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source was opened but a later read failed at the I/O level.
    #[error("failed reading source '{}': {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The source identifier does not carry the tabular-file extension.
    #[error("the file '{identifier}' is not a valid CSV file")]
    UnsupportedExtension { identifier: String },

    /// The source has no header row.
    #[error("the CSV file '{identifier}' is empty")]
    EmptyHeader { identifier: String },

    /// A data row is not valid delimited text (bad quoting, wrong field count, invalid UTF-8).
    #[error("malformed row at line {line}: {source}")]
    MalformedRow {
        line: u64,
        #[source]
        source: csv::Error,
    },

    /// A date window bound is not a `month/day/year` date.
    #[error("invalid window bound '{raw}': expected month/day/year")]
    InvalidWindowBound { raw: String },

    /// A non-empty timestamp cell does not match `month/day/year hour:minute`.
    #[error("invalid date format in column '{column}' at line {line}: {raw}")]
    InvalidTimestamp { line: u64, column: String, raw: String },

    /// A batch source pattern could not be compiled or expanded.
    #[error("invalid source pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A required column name was empty or whitespace-only.
    #[error("the target column name cannot be empty")]
    EmptyColumnName,

    /// A required column name does not appear in the header.
    #[error("the column '{column}' does not exist in the header {headers:?}")]
    UnknownColumn { column: String, headers: Vec<String> },
}

impl QueryError {
    /// Which of the three failure kinds this error belongs to.
    pub fn kind(&self) -> FailureKind {
        match self {
            QueryError::MissingResource { .. } | QueryError::ReadFailed { .. } => {
                FailureKind::MissingResource
            }
            QueryError::UnsupportedExtension { .. }
            | QueryError::EmptyHeader { .. }
            | QueryError::MalformedRow { .. }
            | QueryError::InvalidWindowBound { .. }
            | QueryError::InvalidTimestamp { .. }
            | QueryError::InvalidPattern { .. } => FailureKind::Format,
            QueryError::EmptyColumnName | QueryError::UnknownColumn { .. } => FailureKind::Schema,
        }
    }

    /// Classify a `csv` error raised while reading `path`.
    ///
    /// I/O failures become [`QueryError::ReadFailed`]; everything else is a malformed row.
    pub(crate) fn from_csv(path: &std::path::Path, err: csv::Error) -> Self {
        if err.is_io_error() {
            return QueryError::ReadFailed {
                path: path.to_path_buf(),
                source: err,
            };
        }
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        QueryError::MalformedRow { line, source: err }
    }
}
