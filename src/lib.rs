//! tpch_q5 - parallel in-memory executor for the TPC-H local supplier
//! volume query (Q5)

pub mod cli;
pub mod config;
pub mod observability;
pub mod query;
pub mod report;
pub mod tables;
