//! Error types for console buffer queries and configuration.

use std::fmt;

/// Result type alias for console buffer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for console buffer operations.
///
/// Every variant is a precondition violation by the caller; nothing here is
/// transient, so there is nothing to retry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Global row number outside `1..=total`.
    RowOutOfRange { row: usize, total: usize },
    /// Negative visual column.
    InvalidColumn { col: isize },
    /// Offset past the end of the buffer.
    InvalidIndex { index: usize, len: usize },
    /// Wrap limit must be at least one column.
    InvalidWrapLimit(usize),
    /// Line separator must not be empty.
    InvalidSeparator,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowOutOfRange { row, total } => {
                write!(f, "row {row} out of range (buffer has {total} rows)")
            }
            Self::InvalidColumn { col } => write!(f, "invalid column {col}"),
            Self::InvalidIndex { index, len } => {
                write!(f, "index {index} out of bounds for buffer of {len} chars")
            }
            Self::InvalidWrapLimit(limit) => {
                write!(f, "invalid wrap limit {limit}: must be at least 1")
            }
            Self::InvalidSeparator => write!(f, "line separator must not be empty"),
        }
    }
}

impl std::error::Error for Error {}
