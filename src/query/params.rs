//! Query parameters

use std::num::NonZeroUsize;

use crate::tables::OrderDate;

use super::errors::{QueryError, QueryResult};

/// Half-open order-date interval `[start, end)`.
///
/// An interval whose start is not before its end is empty and admits no
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: OrderDate,
    pub end: OrderDate,
}

impl DateRange {
    pub fn new(start: OrderDate, end: OrderDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: OrderDate) -> bool {
        self.start <= date && date < self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Everything the query needs besides the tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    /// Region name, matched exactly and case-sensitively
    pub region: String,
    pub dates: DateRange,
    pub workers: NonZeroUsize,
}

impl QueryParams {
    /// Builds parameters from a caller-supplied worker count.
    ///
    /// A count of zero or below is rejected here, before anything runs.
    pub fn new(region: impl Into<String>, dates: DateRange, workers: i64) -> QueryResult<Self> {
        let workers = usize::try_from(workers)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or(QueryError::InvalidWorkerCount(workers))?;

        Ok(Self {
            region: region.into(),
            dates,
            workers,
        })
    }

    pub fn worker_count(&self) -> usize {
        self.workers.get()
    }
}
