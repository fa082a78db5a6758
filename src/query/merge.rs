//! Merge of per-worker partial aggregates
//!
//! Runs on the calling thread after every worker has joined. Partials are
//! folded in worker order, so for a fixed worker count the floating-point
//! summation order, and therefore the result, is reproducible.

use super::result::{NationRevenue, ScanSummary};
use super::scan::PartialAggregate;

/// Sums partial revenues for the same nation across all workers.
pub fn merge_partials(partials: &[PartialAggregate<'_>]) -> NationRevenue {
    let mut merged = NationRevenue::new();

    for partial in partials {
        for (nation, revenue) in &partial.revenue {
            merged.add(nation, *revenue);
        }
    }

    merged
}

/// Sums the per-worker row counters
pub fn summarize(partials: &[PartialAggregate<'_>]) -> ScanSummary {
    partials.iter().fold(
        ScanSummary {
            workers: partials.len(),
            ..ScanSummary::default()
        },
        |mut summary, partial| {
            summary.rows_scanned += partial.rows_scanned;
            summary.rows_admitted += partial.rows_admitted;
            summary
        },
    )
}
