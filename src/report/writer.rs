use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::query::NationRevenue;

const HEADER: &str = "NATION\tREVENUE";

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ReportError {
    pub fn code(&self) -> &'static str {
        match self {
            ReportError::Io { .. } => "TPCH_REPORT_IO",
        }
    }
}

/// Renders the report text, one `\n`-terminated line per nation.
pub fn render_report(revenue: &NationRevenue) -> String {
    let mut out = String::with_capacity(HEADER.len() + 1 + revenue.len() * 32);
    out.push_str(HEADER);
    out.push('\n');

    for (nation, total) in revenue.sorted() {
        // Writing into a String cannot fail
        let _ = writeln!(out, "{}\t{:.2}", nation, total);
    }

    out
}

/// Writes the rendered report to `path`, replacing any existing file.
pub fn write_report(path: &Path, revenue: &NationRevenue) -> ReportResult<()> {
    fs::write(path, render_report(revenue)).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
