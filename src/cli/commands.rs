//! CLI command implementation
//!
//! One invocation runs one query:
//! 1. Resolve configuration (file, then flags)
//! 2. Load the six tables
//! 3. Execute the query
//! 4. Write the report
//!
//! Any failure stops the sequence; the report is only written after the
//! query has fully succeeded.

use crate::config::{QueryConfig, RunConfig};
use crate::observability::{log_event_with_fields, Event, ObservationScope, QueryMetrics};
use crate::query::{Q5Executor, QueryOutcome};
use crate::report::write_report;
use crate::tables::TableStore;

use super::args::Cli;
use super::errors::CliResult;

/// Main CLI entry point
///
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_cli(&cli).map(|_| ())
}

/// Resolves the configuration for `cli` and runs the query
pub fn run_cli(cli: &Cli) -> CliResult<QueryOutcome> {
    let file = match &cli.config {
        Some(path) => QueryConfig::load(path)?,
        None => QueryConfig::default(),
    };
    let run = file.merge(cli.overrides()).resolve()?;

    let start = run.params.dates.start.to_string();
    let end = run.params.dates.end.to_string();
    let threads = run.params.worker_count().to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("region", run.params.region.as_str()),
            ("start_date", start.as_str()),
            ("end_date", end.as_str()),
            ("threads", threads.as_str()),
        ],
    );

    execute(&run)
}

/// Loads the tables, runs the query and writes the report
pub fn execute(run: &RunConfig) -> CliResult<QueryOutcome> {
    let store = load_tables(run)?;

    let metrics = QueryMetrics::new();
    let outcome = Q5Executor::new(&store, &metrics).execute(&run.params)?;

    write_report(&run.result_path, &outcome.revenue)?;

    let query_id = outcome.query_id.to_string();
    let path = run.result_path.display().to_string();
    let nations = outcome.revenue.len().to_string();
    let metrics = metrics.to_json();
    log_event_with_fields(
        Event::ReportWritten,
        &[
            ("query_id", query_id.as_str()),
            ("path", path.as_str()),
            ("nations", nations.as_str()),
            ("metrics", metrics.as_str()),
        ],
    );

    Ok(outcome)
}

fn load_tables(run: &RunConfig) -> CliResult<TableStore> {
    let path = run.table_path.display().to_string();
    let scope = ObservationScope::with_fields("LOAD", &[("table_path", path.as_str())]);

    match TableStore::load(&run.table_path) {
        Ok(store) => {
            let counts: Vec<(&str, String)> = store
                .row_counts()
                .iter()
                .map(|(table, n)| (*table, n.to_string()))
                .collect();
            let fields: Vec<(&str, &str)> = counts.iter().map(|(k, v)| (*k, v.as_str())).collect();

            log_event_with_fields(Event::TablesLoaded, &fields);
            scope.complete();
            Ok(store)
        }
        Err(e) => {
            scope.fail(e.code(), &e.to_string());
            Err(e.into())
        }
    }
}
