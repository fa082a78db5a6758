//! Observable query events
//!
//! Events are explicit and typed; each one maps to a fixed log name.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration resolved from file and flags
    ConfigLoaded,
    /// All six tables decoded into memory
    TablesLoaded,
    /// Semi-join cascade produced its key sets
    CascadeComplete,
    /// Scan workers about to be spawned
    ScanBegin,
    /// One worker finished its partition
    WorkerComplete,
    /// All workers joined
    ScanComplete,
    /// Partial aggregates combined
    MergeComplete,
    /// Query aborted
    QueryFailed,
    /// Report file written
    ReportWritten,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::TablesLoaded => "TABLES_LOADED",
            Event::CascadeComplete => "CASCADE_COMPLETE",
            Event::ScanBegin => "SCAN_BEGIN",
            Event::WorkerComplete => "WORKER_COMPLETE",
            Event::ScanComplete => "SCAN_COMPLETE",
            Event::MergeComplete => "MERGE_COMPLETE",
            Event::QueryFailed => "QUERY_FAILED",
            Event::ReportWritten => "REPORT_WRITTEN",
        }
    }

    /// Returns true if this event reports a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::QueryFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
