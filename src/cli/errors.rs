//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit and no report.

use std::fmt;

use crate::config::ConfigError;
use crate::query::QueryError;
use crate::report::ReportError;
use crate::tables::TableError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Settings missing or invalid
    ConfigError,
    /// Tables could not be loaded
    LoadFailed,
    /// Query aborted
    QueryFailed,
    /// Report could not be written
    ReportFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "TPCH_CLI_CONFIG_ERROR",
            Self::LoadFailed => "TPCH_CLI_LOAD_FAILED",
            Self::QueryFailed => "TPCH_CLI_QUERY_FAILED",
            Self::ReportFailed => "TPCH_CLI_REPORT_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    /// Code of the underlying subsystem error, if any
    cause: Option<&'static str>,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            cause: None,
            message: message.into(),
        }
    }

    fn with_cause(code: CliErrorCode, cause: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            cause: Some(cause),
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Code of the subsystem error that caused this one
    pub fn cause_code(&self) -> Option<&'static str> {
        self.cause
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.code.code())?;
        if let Some(cause) = self.cause {
            write!(f, "[{}] ", cause)?;
        }
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<TableError> for CliError {
    fn from(e: TableError) -> Self {
        Self::with_cause(CliErrorCode::LoadFailed, e.code(), e.to_string())
    }
}

impl From<QueryError> for CliError {
    fn from(e: QueryError) -> Self {
        Self::with_cause(CliErrorCode::QueryFailed, e.code(), e.to_string())
    }
}

impl From<ReportError> for CliError {
    fn from(e: ReportError) -> Self {
        Self::with_cause(CliErrorCode::ReportFailed, e.code(), e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
