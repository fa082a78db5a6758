//! CLI argument definitions using clap
//!
//! tpch-q5 --r_name ASIA --start_date 1994-01-01 --end_date 1995-01-01 \
//!         --threads 8 --table_path ./tables --result_path ./result.txt
//!
//! Any flag may instead come from `--config <file.json>`; flags win.

use clap::Parser;
use std::path::PathBuf;

use crate::config::QueryConfig;

/// Revenue per nation for one region and order-date interval (TPC-H Q5)
#[derive(Parser, Debug)]
#[command(name = "tpch-q5")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Region name, matched exactly
    #[arg(long = "r_name")]
    pub r_name: Option<String>,

    /// First order date included (YYYY-MM-DD)
    #[arg(long = "start_date")]
    pub start_date: Option<String>,

    /// First order date excluded (YYYY-MM-DD)
    #[arg(long = "end_date")]
    pub end_date: Option<String>,

    /// Number of scan threads
    #[arg(long, allow_negative_numbers = true)]
    pub threads: Option<i64>,

    /// Directory holding the .tbl files
    #[arg(long = "table_path")]
    pub table_path: Option<PathBuf>,

    /// Report file to write
    #[arg(long = "result_path")]
    pub result_path: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Settings given as flags, to be merged over the config file
    pub fn overrides(&self) -> QueryConfig {
        QueryConfig {
            region: self.r_name.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            threads: self.threads,
            table_path: self.table_path.clone(),
            result_path: self.result_path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "tpch-q5",
            "--r_name",
            "ASIA",
            "--start_date",
            "1994-01-01",
            "--end_date",
            "1995-01-01",
            "--threads",
            "4",
            "--table_path",
            "/tables",
            "--result_path",
            "/out.txt",
        ])
        .unwrap();

        let overrides = cli.overrides();
        assert_eq!(overrides.region.as_deref(), Some("ASIA"));
        assert_eq!(overrides.threads, Some(4));
        assert_eq!(overrides.table_path, Some(PathBuf::from("/tables")));
    }

    #[test]
    fn test_negative_threads_parse() {
        let cli = Cli::try_parse_from(["tpch-q5", "--threads", "-1"]).unwrap();
        assert_eq!(cli.threads, Some(-1));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["tpch-q5", "--region", "ASIA"]).is_err());
    }
}
