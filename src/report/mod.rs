//! Result reporter
//!
//! Renders a `NationRevenue` as a tab-separated report:
//!
//! ```text
//! NATION\tREVENUE
//! INDIA\t900.00
//! ```
//!
//! Rows are ordered by nation name at render time. An empty aggregation
//! renders as the header line alone.

mod writer;

pub use writer::{render_report, write_report, ReportError, ReportResult};
