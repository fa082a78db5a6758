//! Query executor
//!
//! Runs the three phases in strict order, exactly once per call:
//!
//! 1. Cascade: sequential semi-join filtering (fails fast, before any thread
//!    is spawned)
//! 2. Scan: one thread per lineitem partition, all joined before step 3
//! 3. Merge: single-threaded fold of the worker partials
//!
//! Nothing survives between calls except the metrics counters.

use uuid::Uuid;

use crate::observability::{log_event_with_fields, Event, QueryMetrics};
use crate::tables::TableStore;

use super::cascade::SemiJoinCascade;
use super::errors::QueryResult;
use super::merge::{merge_partials, summarize};
use super::params::QueryParams;
use super::result::QueryOutcome;
use super::scan::ParallelScan;

pub struct Q5Executor<'a> {
    store: &'a TableStore,
    metrics: &'a QueryMetrics,
}

impl<'a> Q5Executor<'a> {
    pub fn new(store: &'a TableStore, metrics: &'a QueryMetrics) -> Self {
        Self { store, metrics }
    }

    /// Executes the query against the store.
    ///
    /// Same tables + same parameters = same nation totals, up to
    /// floating-point summation order when the worker count changes.
    pub fn execute(&self, params: &QueryParams) -> QueryResult<QueryOutcome> {
        let query_id = Uuid::new_v4();

        match self.run(query_id, params) {
            Ok(outcome) => {
                self.metrics.increment_queries_executed();
                Ok(outcome)
            }
            Err(e) => {
                self.metrics.increment_queries_failed();
                log_event_with_fields(
                    Event::QueryFailed,
                    &[
                        ("query_id", &query_id.to_string()),
                        ("code", e.code()),
                        ("reason", &e.to_string()),
                    ],
                );
                Err(e)
            }
        }
    }

    fn run(&self, query_id: Uuid, params: &QueryParams) -> QueryResult<QueryOutcome> {
        let id = query_id.to_string();

        let cascade = SemiJoinCascade::run(self.store, params)?;
        let stats = cascade.stats.as_fields();
        let mut fields: Vec<(&str, &str)> = stats.iter().map(|(k, v)| (*k, v.as_str())).collect();
        fields.push(("query_id", &id));
        fields.push(("region", &params.region));
        log_event_with_fields(Event::CascadeComplete, &fields);

        let workers = params.worker_count();
        log_event_with_fields(
            Event::ScanBegin,
            &[
                ("query_id", &id),
                ("workers", &workers.to_string()),
                ("rows", &self.store.lineitem().len().to_string()),
            ],
        );
        self.metrics.add_workers_spawned(workers as u64);

        let partials = ParallelScan::run(self.store.lineitem(), &cascade, params.workers)?;

        for partial in &partials {
            self.metrics
                .record_scan(partial.rows_scanned as u64, partial.rows_admitted as u64);
            log_event_with_fields(
                Event::WorkerComplete,
                &[
                    ("query_id", &id),
                    ("worker", &partial.worker.to_string()),
                    ("rows_scanned", &partial.rows_scanned.to_string()),
                    ("rows_admitted", &partial.rows_admitted.to_string()),
                    ("nations", &partial.revenue.len().to_string()),
                ],
            );
        }

        let scan = summarize(&partials);
        log_event_with_fields(
            Event::ScanComplete,
            &[
                ("query_id", &id),
                ("rows_scanned", &scan.rows_scanned.to_string()),
                ("rows_admitted", &scan.rows_admitted.to_string()),
            ],
        );

        let revenue = merge_partials(&partials);
        log_event_with_fields(
            Event::MergeComplete,
            &[("query_id", &id), ("nations", &revenue.len().to_string())],
        );

        Ok(QueryOutcome {
            query_id,
            revenue,
            cascade: cascade.stats,
            scan,
        })
    }
}
