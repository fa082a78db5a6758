//! Local supplier volume query
//!
//! "For one region and one order-date interval, total revenue per nation of
//! the suppliers that fulfilled qualifying orders."
//!
//! # Execution Flow (strict order)
//!
//! 1. Semi-join cascade: region -> nation -> supplier / customer -> orders
//! 2. Partitioned scan of lineitem, one thread per contiguous range
//! 3. Merge of the worker-private partial aggregates
//!
//! # Guarantees
//!
//! - Tables and cascade outputs are read-only once the scan starts
//! - Worker accumulators are never shared; they meet only in the merge
//! - Precondition and cascade failures abort before any worker is spawned

mod cascade;
mod errors;
mod executor;
mod merge;
mod params;
mod result;
mod scan;

pub use cascade::{CascadeOutput, CascadeStats, SemiJoinCascade};
pub use errors::{QueryError, QueryResult};
pub use executor::Q5Executor;
pub use merge::{merge_partials, summarize};
pub use params::{DateRange, QueryParams};
pub use result::{NationRevenue, QueryOutcome, ScanSummary};
pub use scan::{partition_ranges, ParallelScan, PartialAggregate, ScanWorker};
