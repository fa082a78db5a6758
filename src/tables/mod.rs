//! Table store for the TPC-H tables read by the query
//!
//! Rows are decoded into typed records when the `.tbl` files are loaded,
//! so the query never parses text on the hot path.
//!
//! # Layout
//!
//! - `record`: typed records and the `TableRecord` decoding trait
//! - `loader`: `|`-delimited line parsing
//! - `store`: the immutable six-table store

mod errors;
mod loader;
mod record;
mod store;

pub use errors::{TableError, TableResult};
pub use loader::{load_table, parse_line, parse_table};
pub use record::{
    Customer, Fields, Key, Lineitem, Nation, Order, OrderDate, Region, Supplier, TableRecord,
};
pub use store::{TableStore, TableStoreBuilder};
