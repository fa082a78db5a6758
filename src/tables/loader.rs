//! Flat-file table loader
//!
//! Tables are stored as `<table_path>/<table>.tbl`, one row per line,
//! fields separated by `|`. The dbgen tool terminates every row with a
//! trailing `|`, which does not start a new field.
//!
//! Any line that fails to decode aborts the load of the whole table.

use std::fs;
use std::path::Path;

use super::errors::{TableError, TableResult};
use super::record::{Fields, TableRecord};

const DELIMITER: char = '|';

/// Splits one line into its raw fields.
pub fn parse_line(line: &str) -> Vec<&str> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let line = line.strip_suffix(DELIMITER).unwrap_or(line);
    line.split(DELIMITER).collect()
}

/// Decodes every non-blank line of `content` into records of type `R`.
pub fn parse_table<R: TableRecord>(content: &str) -> TableResult<Vec<R>> {
    let mut rows = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let fields = Fields::new(R::TABLE, R::COLUMNS, idx + 1, parse_line(line));
        rows.push(R::from_fields(&fields)?);
    }

    Ok(rows)
}

/// Reads `<dir>/<R::FILE>` into typed records.
pub fn load_table<R: TableRecord>(dir: &Path) -> TableResult<Vec<R>> {
    let path = dir.join(R::FILE);
    let content = fs::read_to_string(&path).map_err(|source| TableError::Io {
        path: path.clone(),
        source,
    })?;

    parse_table(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::record::{Nation, Order, Region};
    use tempfile::TempDir;

    #[test]
    fn test_parse_line_trailing_delimiter() {
        assert_eq!(parse_line("0|AFRICA|comment|"), vec!["0", "AFRICA", "comment"]);
        assert_eq!(parse_line("0|AFRICA|comment"), vec!["0", "AFRICA", "comment"]);
    }

    #[test]
    fn test_parse_line_keeps_inner_empty_fields() {
        assert_eq!(parse_line("1||x|"), vec!["1", "", "x"]);
    }

    #[test]
    fn test_parse_line_crlf() {
        assert_eq!(parse_line("2|ASIA|c|\r"), vec!["2", "ASIA", "c"]);
    }

    #[test]
    fn test_parse_table_skips_blank_lines() {
        let content = "0|AFRICA|x|\n\n2|ASIA|y|\n";
        let regions: Vec<Region> = parse_table(content).unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[1].name, "ASIA");
    }

    #[test]
    fn test_parse_table_reports_line_number() {
        let content = "1|370|O|1.0|1996-01-02|\n2|781|O|2.0|not-a-date|\n";
        let err = parse_table::<Order>(content).unwrap_err();
        match err {
            TableError::MalformedField { table, line, .. } => {
                assert_eq!(table, "orders");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_table_from_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("nation.tbl"),
            "8|INDIA|2|comment|\n9|INDONESIA|2|comment|\n",
        )
        .unwrap();

        let nations: Vec<Nation> = load_table(tmp.path()).unwrap();
        assert_eq!(nations.len(), 2);
        assert_eq!(nations[0].name, "INDIA");
        assert_eq!(nations[0].region_key.as_str(), "2");
    }

    #[test]
    fn test_load_table_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = load_table::<Region>(tmp.path()).unwrap_err();
        assert_eq!(err.code(), "TPCH_TABLE_IO");
    }
}
