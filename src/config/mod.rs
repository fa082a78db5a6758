//! Query configuration
//!
//! Settings come from an optional JSON file and from command-line flags;
//! flags win. Once merged, the configuration is validated and resolved into
//! query parameters plus the input and output paths.
//!
//! ```json
//! {
//!   "region": "ASIA",
//!   "start_date": "1994-01-01",
//!   "end_date": "1995-01-01",
//!   "threads": 8,
//!   "table_path": "./tables",
//!   "result_path": "./result.txt"
//! }
//! ```

mod errors;

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use serde::{Deserialize, Serialize};

use crate::query::{DateRange, QueryParams};
use crate::tables::OrderDate;

pub use errors::{ConfigError, ConfigResult};

/// Raw settings, every field optional until `resolve`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryConfig {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    /// Worker threads; defaults to the available parallelism
    #[serde(default)]
    pub threads: Option<i64>,
    #[serde(default)]
    pub table_path: Option<PathBuf>,
    #[serde(default)]
    pub result_path: Option<PathBuf>,
}

/// Validated settings ready to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub params: QueryParams,
    pub table_path: PathBuf,
    pub result_path: PathBuf,
}

impl QueryConfig {
    /// Loads settings from a JSON file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns `self` with every setting present in `overrides` replaced
    pub fn merge(self, overrides: QueryConfig) -> Self {
        Self {
            region: overrides.region.or(self.region),
            start_date: overrides.start_date.or(self.start_date),
            end_date: overrides.end_date.or(self.end_date),
            threads: overrides.threads.or(self.threads),
            table_path: overrides.table_path.or(self.table_path),
            result_path: overrides.result_path.or(self.result_path),
        }
    }

    /// Validates the settings and builds the run configuration
    pub fn resolve(self) -> ConfigResult<RunConfig> {
        let region = self.region.ok_or(ConfigError::Missing("region"))?;
        let start = parse_date("start_date", self.start_date)?;
        let end = parse_date("end_date", self.end_date)?;
        let table_path = self.table_path.ok_or(ConfigError::Missing("table_path"))?;
        let result_path = self.result_path.ok_or(ConfigError::Missing("result_path"))?;
        let threads = self.threads.unwrap_or_else(default_threads);

        let params = QueryParams::new(region, DateRange::new(start, end), threads)
            .map_err(|_| ConfigError::InvalidThreads(threads))?;

        Ok(RunConfig {
            params,
            table_path,
            result_path,
        })
    }
}

fn parse_date(field: &'static str, value: Option<String>) -> ConfigResult<OrderDate> {
    let value = value.ok_or(ConfigError::Missing(field))?;
    value
        .parse::<OrderDate>()
        .map_err(|reason| ConfigError::InvalidDate {
            field,
            value,
            reason,
        })
}

fn default_threads() -> i64 {
    thread::available_parallelism().map_or(1, |n| n.get() as i64)
}
