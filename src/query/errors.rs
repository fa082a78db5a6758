//! Query error types
//!
//! Error codes:
//! - TPCH_INVALID_WORKER_COUNT (precondition, raised before any scan)
//! - TPCH_REGION_NOT_FOUND (cascade, raised before any scan)
//! - TPCH_MISSING_SUPPLIER_NATION (data integrity, raised by a worker)
//! - TPCH_MISSING_NATION_NAME (data integrity, raised by a worker)
//! - TPCH_WORKER_PANICKED

use thiserror::Error;

use crate::tables::Key;

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("worker count must be positive, got {0}")]
    InvalidWorkerCount(i64),

    #[error("region not found: '{0}'")]
    RegionNotFound(String),

    #[error("supplier {supplier_key} has no nation entry (lineitem row {row})")]
    MissingSupplierNation { supplier_key: Key, row: usize },

    #[error("nation {nation_key} has no name entry (lineitem row {row})")]
    MissingNationName { nation_key: Key, row: usize },

    #[error("scan worker {worker} panicked")]
    WorkerPanicked { worker: usize },
}

impl QueryError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::InvalidWorkerCount(_) => "TPCH_INVALID_WORKER_COUNT",
            QueryError::RegionNotFound(_) => "TPCH_REGION_NOT_FOUND",
            QueryError::MissingSupplierNation { .. } => "TPCH_MISSING_SUPPLIER_NATION",
            QueryError::MissingNationName { .. } => "TPCH_MISSING_NATION_NAME",
            QueryError::WorkerPanicked { .. } => "TPCH_WORKER_PANICKED",
        }
    }

    /// Returns true if the source tables violate referential integrity
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            QueryError::MissingSupplierNation { .. } | QueryError::MissingNationName { .. }
        )
    }
}
