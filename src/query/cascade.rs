//! Semi-join filter cascade
//!
//! Narrows the dimension tables down to the keys that can contribute
//! revenue, following foreign keys from Region to Orders:
//!
//! 1. Region: name equals the requested region
//! 2. Nation: region key in (1); remember nation names
//! 3. Supplier: nation key in (2); remember supplier nations
//! 4. Customer: nation key in (2)
//! 5. Orders: customer key in (4) and order date in `[start, end)`
//!
//! Each step is one linear pass over its table. The resulting sets borrow
//! from the table store and are read-only for the rest of the query.

use std::collections::{HashMap, HashSet};

use crate::tables::TableStore;

use super::errors::{QueryError, QueryResult};
use super::params::QueryParams;

/// Key sets and lookup maps produced by the cascade
#[derive(Debug, Clone, Default)]
pub struct CascadeOutput<'a> {
    pub order_keys: HashSet<&'a str>,
    pub supplier_keys: HashSet<&'a str>,
    /// supplier key -> nation key
    pub supplier_nation: HashMap<&'a str, &'a str>,
    /// nation key -> nation name
    pub nation_names: HashMap<&'a str, &'a str>,
    pub stats: CascadeStats,
}

/// Cardinality of every step, for logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeStats {
    pub regions: usize,
    pub nations: usize,
    pub suppliers: usize,
    pub customers: usize,
    pub orders: usize,
}

impl CascadeStats {
    pub fn as_fields(&self) -> [(&'static str, String); 5] {
        [
            ("regions", self.regions.to_string()),
            ("nations", self.nations.to_string()),
            ("suppliers", self.suppliers.to_string()),
            ("customers", self.customers.to_string()),
            ("orders", self.orders.to_string()),
        ]
    }
}

pub struct SemiJoinCascade;

impl SemiJoinCascade {
    /// Runs all five steps in order.
    ///
    /// Fails with `RegionNotFound` if no region carries the requested name;
    /// every later step may legitimately produce an empty set.
    pub fn run<'a>(store: &'a TableStore, params: &QueryParams) -> QueryResult<CascadeOutput<'a>> {
        let region_keys = Self::regions(store, &params.region);
        if region_keys.is_empty() {
            return Err(QueryError::RegionNotFound(params.region.clone()));
        }

        let nation_names = Self::nations(store, &region_keys);
        let supplier_nation = Self::suppliers(store, &nation_names);
        let customer_keys = Self::customers(store, &nation_names);
        let order_keys = Self::orders(store, &customer_keys, params);

        let stats = CascadeStats {
            regions: region_keys.len(),
            nations: nation_names.len(),
            suppliers: supplier_nation.len(),
            customers: customer_keys.len(),
            orders: order_keys.len(),
        };

        Ok(CascadeOutput {
            order_keys,
            supplier_keys: supplier_nation.keys().copied().collect(),
            supplier_nation,
            nation_names,
            stats,
        })
    }

    fn regions<'a>(store: &'a TableStore, name: &str) -> HashSet<&'a str> {
        store
            .region()
            .iter()
            .filter(|r| r.name == name)
            .map(|r| r.key.as_str())
            .collect()
    }

    /// Qualifying nations, keyed by nation key with the nation name as value
    fn nations<'a>(store: &'a TableStore, region_keys: &HashSet<&str>) -> HashMap<&'a str, &'a str> {
        store
            .nation()
            .iter()
            .filter(|n| region_keys.contains(n.region_key.as_str()))
            .map(|n| (n.key.as_str(), n.name.as_str()))
            .collect()
    }

    fn suppliers<'a>(
        store: &'a TableStore,
        nations: &HashMap<&str, &str>,
    ) -> HashMap<&'a str, &'a str> {
        store
            .supplier()
            .iter()
            .filter(|s| nations.contains_key(s.nation_key.as_str()))
            .map(|s| (s.key.as_str(), s.nation_key.as_str()))
            .collect()
    }

    fn customers<'a>(store: &'a TableStore, nations: &HashMap<&str, &str>) -> HashSet<&'a str> {
        store
            .customer()
            .iter()
            .filter(|c| nations.contains_key(c.nation_key.as_str()))
            .map(|c| c.key.as_str())
            .collect()
    }

    fn orders<'a>(
        store: &'a TableStore,
        customer_keys: &HashSet<&str>,
        params: &QueryParams,
    ) -> HashSet<&'a str> {
        store
            .orders()
            .iter()
            .filter(|o| {
                customer_keys.contains(o.customer_key.as_str()) && params.dates.contains(o.order_date)
            })
            .map(|o| o.key.as_str())
            .collect()
    }
}
