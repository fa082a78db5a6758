//! In-memory table store
//!
//! Holds the six tables the query reads. The store is immutable once built
//! and is shared by reference with every scan worker.

use std::path::Path;

use super::errors::TableResult;
use super::loader::load_table;
use super::record::{Customer, Lineitem, Nation, Order, Region, Supplier};

#[derive(Debug, Clone, Default)]
pub struct TableStore {
    region: Vec<Region>,
    nation: Vec<Nation>,
    supplier: Vec<Supplier>,
    customer: Vec<Customer>,
    orders: Vec<Order>,
    lineitem: Vec<Lineitem>,
}

impl TableStore {
    /// Loads all six tables from a directory of `.tbl` files.
    ///
    /// The first table that fails to load aborts the whole load.
    pub fn load(dir: &Path) -> TableResult<Self> {
        Ok(Self {
            region: load_table(dir)?,
            nation: load_table(dir)?,
            supplier: load_table(dir)?,
            customer: load_table(dir)?,
            orders: load_table(dir)?,
            lineitem: load_table(dir)?,
        })
    }

    /// Starts an empty store for programmatic construction
    pub fn builder() -> TableStoreBuilder {
        TableStoreBuilder::default()
    }

    pub fn region(&self) -> &[Region] {
        &self.region
    }

    pub fn nation(&self) -> &[Nation] {
        &self.nation
    }

    pub fn supplier(&self) -> &[Supplier] {
        &self.supplier
    }

    pub fn customer(&self) -> &[Customer] {
        &self.customer
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn lineitem(&self) -> &[Lineitem] {
        &self.lineitem
    }

    /// Row counts per table, in load order
    pub fn row_counts(&self) -> [(&'static str, usize); 6] {
        [
            ("region", self.region.len()),
            ("nation", self.nation.len()),
            ("supplier", self.supplier.len()),
            ("customer", self.customer.len()),
            ("orders", self.orders.len()),
            ("lineitem", self.lineitem.len()),
        ]
    }
}

/// Builder for stores assembled in memory
#[derive(Debug, Default)]
pub struct TableStoreBuilder {
    store: TableStore,
}

impl TableStoreBuilder {
    pub fn region(mut self, rows: Vec<Region>) -> Self {
        self.store.region = rows;
        self
    }

    pub fn nation(mut self, rows: Vec<Nation>) -> Self {
        self.store.nation = rows;
        self
    }

    pub fn supplier(mut self, rows: Vec<Supplier>) -> Self {
        self.store.supplier = rows;
        self
    }

    pub fn customer(mut self, rows: Vec<Customer>) -> Self {
        self.store.customer = rows;
        self
    }

    pub fn orders(mut self, rows: Vec<Order>) -> Self {
        self.store.orders = rows;
        self
    }

    pub fn lineitem(mut self, rows: Vec<Lineitem>) -> Self {
        self.store.lineitem = rows;
        self
    }

    pub fn build(self) -> TableStore {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::record::Key;
    use std::fs;
    use tempfile::TempDir;

    fn write_tables(dir: &Path) {
        fs::write(dir.join("region.tbl"), "2|ASIA|c|\n").unwrap();
        fs::write(dir.join("nation.tbl"), "8|INDIA|2|c|\n").unwrap();
        fs::write(dir.join("supplier.tbl"), "1|Supplier#1|addr|8|phone|1.0|c|\n").unwrap();
        fs::write(
            dir.join("customer.tbl"),
            "1|Customer#1|addr|8|phone|1.0|BUILDING|c|\n",
        )
        .unwrap();
        fs::write(dir.join("orders.tbl"), "1|1|O|100.0|1994-03-01|1-URGENT|clerk|0|c|\n")
            .unwrap();
        fs::write(
            dir.join("lineitem.tbl"),
            "1|1|1|1|1|1000.00|0.10|0.0|N|O|1994-03-02|1994-03-02|1994-03-02|NONE|AIR|c|\n",
        )
        .unwrap();
    }

    #[test]
    fn test_load_all_tables() {
        let tmp = TempDir::new().unwrap();
        write_tables(tmp.path());

        let store = TableStore::load(tmp.path()).unwrap();
        for (table, count) in store.row_counts() {
            assert_eq!(count, 1, "table {table}");
        }
        assert_eq!(store.lineitem()[0].discount, 0.10);
    }

    #[test]
    fn test_load_fails_on_missing_table() {
        let tmp = TempDir::new().unwrap();
        write_tables(tmp.path());
        fs::remove_file(tmp.path().join("customer.tbl")).unwrap();

        assert!(TableStore::load(tmp.path()).is_err());
    }

    #[test]
    fn test_builder() {
        let store = TableStore::builder()
            .region(vec![Region {
                key: Key::from("0"),
                name: "AFRICA".to_string(),
            }])
            .build();
        assert_eq!(store.region().len(), 1);
        assert!(store.lineitem().is_empty());
    }
}
