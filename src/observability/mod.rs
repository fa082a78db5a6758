//! Observability for query execution
//!
//! - Structured logging (JSON lines on stderr)
//! - Query metrics
//! - Phase scopes with elapsed time
//!
//! Observability is read-only: nothing here can fail a query or change its
//! result.
//!
//! ```ignore
//! use tpch_q5::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::ScanBegin, &[("workers", "8")]);
//! ```

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsSnapshot, QueryMetrics};
pub use scope::{ObservationScope, Timer};

/// Log a query event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a query event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_failure() {
        Severity::Error
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        log_event(Event::TablesLoaded);
        log_event(Event::QueryFailed);
    }

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::ScanComplete, &[("workers", "2")]);
    }
}
