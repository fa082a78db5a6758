//! Partitioned aggregation scan over lineitem
//!
//! The lineitem table is split into contiguous index ranges, one per
//! worker. Each worker tests its rows against the cascade's key sets and
//! sums revenue per nation into an accumulator it alone owns. Workers share
//! nothing mutable; their accumulators are handed back on join.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::ops::Range;
use std::thread;

use crate::tables::{Key, Lineitem};

use super::cascade::CascadeOutput;
use super::errors::{QueryError, QueryResult};

/// Splits `[0, len)` into `workers` contiguous ranges.
///
/// Every range holds `len / workers` rows except the last, which also takes
/// the remainder. With more workers than rows, all ranges but the last are
/// empty.
pub fn partition_ranges(len: usize, workers: NonZeroUsize) -> Vec<Range<usize>> {
    let workers = workers.get();
    let chunk = len / workers;

    (0..workers)
        .map(|i| {
            let start = i * chunk;
            let end = if i == workers - 1 { len } else { start + chunk };
            start..end
        })
        .collect()
}

/// One worker's private result
#[derive(Debug, Clone, PartialEq)]
pub struct PartialAggregate<'a> {
    pub worker: usize,
    pub range: Range<usize>,
    /// nation name -> revenue
    pub revenue: HashMap<&'a str, f64>,
    pub rows_scanned: usize,
    pub rows_admitted: usize,
}

/// Per-row filter, lookup and accumulate logic, shared read-only by all
/// workers of one scan.
pub struct ScanWorker<'a, 'c> {
    lineitems: &'a [Lineitem],
    cascade: &'c CascadeOutput<'a>,
}

impl<'a, 'c> ScanWorker<'a, 'c> {
    pub fn new(lineitems: &'a [Lineitem], cascade: &'c CascadeOutput<'a>) -> Self {
        Self { lineitems, cascade }
    }

    /// Scans `range` and returns the worker's partial aggregate.
    ///
    /// A row that passes both key filters but cannot be resolved to a nation
    /// name fails the whole partition.
    pub fn scan(&self, worker: usize, range: Range<usize>) -> QueryResult<PartialAggregate<'a>> {
        let mut revenue: HashMap<&'a str, f64> = HashMap::new();
        let mut rows_admitted = 0;

        for row in range.clone() {
            let item = &self.lineitems[row];

            if !self.cascade.order_keys.contains(item.order_key.as_str())
                || !self.cascade.supplier_keys.contains(item.supplier_key.as_str())
            {
                continue;
            }

            let nation = self.nation_of(item, row)?;
            *revenue.entry(nation).or_insert(0.0) += item.revenue();
            rows_admitted += 1;
        }

        Ok(PartialAggregate {
            worker,
            rows_scanned: range.len(),
            range,
            revenue,
            rows_admitted,
        })
    }

    /// supplier -> nation key -> nation name
    fn nation_of(&self, item: &Lineitem, row: usize) -> QueryResult<&'a str> {
        let nation_key = self
            .cascade
            .supplier_nation
            .get(item.supplier_key.as_str())
            .ok_or_else(|| QueryError::MissingSupplierNation {
                supplier_key: item.supplier_key.clone(),
                row,
            })?;

        self.cascade
            .nation_names
            .get(nation_key)
            .copied()
            .ok_or_else(|| QueryError::MissingNationName {
                nation_key: Key::from(*nation_key),
                row,
            })
    }
}

pub struct ParallelScan;

impl ParallelScan {
    /// Runs one thread per partition and joins them all.
    ///
    /// Partials come back in worker order. If any worker failed, the error
    /// of the lowest-numbered failing worker is returned; a panicking
    /// worker surfaces as `WorkerPanicked`.
    pub fn run<'a>(
        lineitems: &'a [Lineitem],
        cascade: &CascadeOutput<'a>,
        workers: NonZeroUsize,
    ) -> QueryResult<Vec<PartialAggregate<'a>>> {
        let scan = ScanWorker::new(lineitems, cascade);
        let ranges = partition_ranges(lineitems.len(), workers);

        let results: Vec<QueryResult<PartialAggregate<'a>>> = thread::scope(|s| {
            let handles: Vec<_> = ranges
                .into_iter()
                .enumerate()
                .map(|(worker, range)| {
                    let scan = &scan;
                    s.spawn(move || scan.scan(worker, range))
                })
                .collect();

            handles
                .into_iter()
                .enumerate()
                .map(|(worker, handle)| {
                    handle
                        .join()
                        .unwrap_or(Err(QueryError::WorkerPanicked { worker }))
                })
                .collect()
        });

        results.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn n(v: usize) -> NonZeroUsize {
        NonZeroUsize::new(v).unwrap()
    }

    fn item(order: &str, supplier: &str, price: f64, discount: f64) -> Lineitem {
        Lineitem {
            order_key: Key::from(order),
            supplier_key: Key::from(supplier),
            extended_price: price,
            discount,
        }
    }

    fn cascade() -> CascadeOutput<'static> {
        CascadeOutput {
            order_keys: HashSet::from(["o1", "o2"]),
            supplier_keys: HashSet::from(["s1", "s2"]),
            supplier_nation: HashMap::from([("s1", "8"), ("s2", "12")]),
            nation_names: HashMap::from([("8", "INDIA"), ("12", "JAPAN")]),
            stats: Default::default(),
        }
    }

    #[test]
    fn test_partition_covers_all_rows() {
        let ranges = partition_ranges(10, n(3));
        assert_eq!(ranges, vec![0..3, 3..6, 6..10]);
    }

    #[test]
    fn test_partition_single_worker() {
        assert_eq!(partition_ranges(7, n(1)), vec![0..7]);
    }

    #[test]
    fn test_partition_more_workers_than_rows() {
        let ranges = partition_ranges(2, n(4));
        assert_eq!(ranges, vec![0..0, 0..0, 0..0, 0..2]);
    }

    #[test]
    fn test_partition_empty_table() {
        let ranges = partition_ranges(0, n(3));
        assert!(ranges.iter().all(|r| r.is_empty()));
        assert_eq!(ranges.len(), 3);
    }

    #[test]
    fn test_partition_ranges_contiguous() {
        for len in 0..40 {
            for workers in 1..9 {
                let ranges = partition_ranges(len, n(workers));
                assert_eq!(ranges.len(), workers);
                assert_eq!(ranges[0].start, 0);
                assert_eq!(ranges[workers - 1].end, len);
                for pair in ranges.windows(2) {
                    assert_eq!(pair[0].end, pair[1].start);
                }
            }
        }
    }

    #[test]
    fn test_scan_requires_both_keys() {
        let items = vec![
            item("o1", "s1", 100.0, 0.0),
            // order not qualifying
            item("o9", "s1", 100.0, 0.0),
            // supplier not qualifying
            item("o1", "s9", 100.0, 0.0),
        ];
        let cascade = cascade();
        let worker = ScanWorker::new(&items, &cascade);

        let partial = worker.scan(0, 0..items.len()).unwrap();
        assert_eq!(partial.rows_scanned, 3);
        assert_eq!(partial.rows_admitted, 1);
        assert_eq!(partial.revenue.get("INDIA"), Some(&100.0));
        assert_eq!(partial.revenue.len(), 1);
    }

    #[test]
    fn test_scan_sums_per_nation() {
        let items = vec![
            item("o1", "s1", 1000.0, 0.10),
            item("o2", "s1", 200.0, 0.50),
            item("o2", "s2", 50.0, 0.0),
        ];
        let cascade = cascade();
        let worker = ScanWorker::new(&items, &cascade);

        let partial = worker.scan(0, 0..3).unwrap();
        let india = partial.revenue["INDIA"];
        assert!((india - 1000.0).abs() < 1e-9);
        assert_eq!(partial.revenue["JAPAN"], 50.0);
    }

    #[test]
    fn test_scan_only_reads_its_range() {
        let items = vec![item("o1", "s1", 1.0, 0.0), item("o1", "s1", 2.0, 0.0)];
        let cascade = cascade();
        let worker = ScanWorker::new(&items, &cascade);

        let partial = worker.scan(1, 1..2).unwrap();
        assert_eq!(partial.worker, 1);
        assert_eq!(partial.revenue["INDIA"], 2.0);
    }

    #[test]
    fn test_missing_supplier_nation_is_error() {
        let items = vec![item("o1", "s1", 1.0, 0.0)];
        let mut cascade = cascade();
        cascade.supplier_nation.remove("s1");

        let err = ScanWorker::new(&items, &cascade).scan(0, 0..1).unwrap_err();
        assert_eq!(
            err,
            QueryError::MissingSupplierNation {
                supplier_key: Key::from("s1"),
                row: 0,
            }
        );
    }

    #[test]
    fn test_missing_nation_name_is_error() {
        let items = vec![item("o1", "s2", 1.0, 0.0)];
        let mut cascade = cascade();
        cascade.nation_names.remove("12");

        let err = ScanWorker::new(&items, &cascade).scan(0, 0..1).unwrap_err();
        assert_eq!(err.code(), "TPCH_MISSING_NATION_NAME");
    }

    #[test]
    fn test_parallel_scan_returns_partials_in_worker_order() {
        let items: Vec<_> = (0..10).map(|i| item("o1", "s1", i as f64, 0.0)).collect();
        let cascade = cascade();

        let partials = ParallelScan::run(&items, &cascade, n(3)).unwrap();
        assert_eq!(partials.len(), 3);
        for (idx, partial) in partials.iter().enumerate() {
            assert_eq!(partial.worker, idx);
        }
        assert_eq!(partials[2].range, 6..10);

        let scanned: usize = partials.iter().map(|p| p.rows_scanned).sum();
        assert_eq!(scanned, 10);
    }

    #[test]
    fn test_parallel_scan_surfaces_lowest_failing_worker() {
        // rows 2 and 5 both fail; with 3 workers they land in workers 0 and 1
        let mut items: Vec<_> = (0..9).map(|_| item("o1", "s1", 1.0, 0.0)).collect();
        items[2] = item("o1", "s2", 1.0, 0.0);
        items[5] = item("o1", "s2", 1.0, 0.0);

        let mut cascade = cascade();
        cascade.supplier_nation.remove("s2");

        let err = ParallelScan::run(&items, &cascade, n(3)).unwrap_err();
        assert_eq!(
            err,
            QueryError::MissingSupplierNation {
                supplier_key: Key::from("s2"),
                row: 2,
            }
        );
    }
}
