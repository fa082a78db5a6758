//! Table loading error types
//!
//! Error codes:
//! - TPCH_TABLE_IO
//! - TPCH_TABLE_MISSING_FIELD
//! - TPCH_TABLE_MALFORMED_FIELD

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

/// Errors raised while reading a flat-file table into typed records.
///
/// Line numbers are 1-based and refer to the physical line in the file.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{table}:{line}: missing column {column}")]
    MissingField {
        table: &'static str,
        line: usize,
        column: &'static str,
    },

    #[error("{table}:{line}: malformed {column} value '{value}': {reason}")]
    MalformedField {
        table: &'static str,
        line: usize,
        column: &'static str,
        value: String,
        reason: String,
    },
}

impl TableError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            TableError::Io { .. } => "TPCH_TABLE_IO",
            TableError::MissingField { .. } => "TPCH_TABLE_MISSING_FIELD",
            TableError::MalformedField { .. } => "TPCH_TABLE_MALFORMED_FIELD",
        }
    }

    /// Returns the table the error belongs to, if known
    pub fn table(&self) -> Option<&'static str> {
        match self {
            TableError::Io { .. } => None,
            TableError::MissingField { table, .. } | TableError::MalformedField { table, .. } => {
                Some(table)
            }
        }
    }
}
