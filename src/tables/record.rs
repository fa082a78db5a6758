//! Typed TPC-H records
//!
//! Each table row is decoded once, at load time, into a fixed record type.
//! Only the columns the local supplier volume query reads are kept; the
//! remaining columns are still declared so positions line up with the
//! `.tbl` layout.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use super::errors::{TableError, TableResult};

/// Opaque row identifier.
///
/// Keys compare by their raw text only. `"7"` and `"07"` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(String);

impl Key {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Key {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for Key {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Calendar date in fixed-width `YYYY-MM-DD` form.
///
/// Ordering matches the lexicographic ordering of the textual form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderDate(NaiveDate);

impl OrderDate {
    const FORMAT: &'static str = "%Y-%m-%d";
    const WIDTH: usize = 10;

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl FromStr for OrderDate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono tolerates unpadded months and days; the text form must not
        if s.len() != Self::WIDTH {
            return Err(format!("expected {} characters (YYYY-MM-DD)", Self::WIDTH));
        }
        NaiveDate::parse_from_str(s, Self::FORMAT)
            .map(Self)
            .map_err(|e| e.to_string())
    }
}

impl fmt::Display for OrderDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

/// The fields of one delimited line, with enough context to report errors.
pub struct Fields<'a> {
    table: &'static str,
    columns: &'static [&'static str],
    line: usize,
    values: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    pub fn new(
        table: &'static str,
        columns: &'static [&'static str],
        line: usize,
        values: Vec<&'a str>,
    ) -> Self {
        Self {
            table,
            columns,
            line,
            values,
        }
    }

    /// Returns the 1-based source line
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the number of fields on the line
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn column(&self, idx: usize) -> &'static str {
        self.columns.get(idx).copied().unwrap_or("<unknown>")
    }

    /// Raw text of a column
    pub fn text(&self, idx: usize) -> TableResult<&'a str> {
        self.values
            .get(idx)
            .copied()
            .ok_or_else(|| TableError::MissingField {
                table: self.table,
                line: self.line,
                column: self.column(idx),
            })
    }

    pub fn key(&self, idx: usize) -> TableResult<Key> {
        self.text(idx).map(Key::from)
    }

    pub fn string(&self, idx: usize) -> TableResult<String> {
        self.text(idx).map(str::to_string)
    }

    /// Decimal amount; must be finite
    pub fn amount(&self, idx: usize) -> TableResult<f64> {
        let raw = self.text(idx)?;
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            Ok(_) => Err(self.malformed(idx, raw, "not a finite number")),
            Err(e) => Err(self.malformed(idx, raw, e.to_string())),
        }
    }

    /// Fraction in `[0, 1]`
    pub fn fraction(&self, idx: usize) -> TableResult<f64> {
        let value = self.amount(idx)?;
        if !(0.0..=1.0).contains(&value) {
            let raw = self.text(idx)?;
            return Err(self.malformed(idx, raw, "outside [0, 1]"));
        }
        Ok(value)
    }

    pub fn date(&self, idx: usize) -> TableResult<OrderDate> {
        let raw = self.text(idx)?;
        raw.parse::<OrderDate>()
            .map_err(|reason| self.malformed(idx, raw, reason))
    }

    fn malformed(&self, idx: usize, raw: &str, reason: impl Into<String>) -> TableError {
        TableError::MalformedField {
            table: self.table,
            line: self.line,
            column: self.column(idx),
            value: raw.to_string(),
            reason: reason.into(),
        }
    }
}

/// A typed row of one of the six tables.
pub trait TableRecord: Sized + Send + Sync {
    /// Table name used in errors and logs
    const TABLE: &'static str;
    /// File name inside the table directory
    const FILE: &'static str;
    /// Positional column layout of the file
    const COLUMNS: &'static [&'static str];

    /// Decodes one line's fields into a record
    fn from_fields(fields: &Fields<'_>) -> TableResult<Self>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub key: Key,
    pub name: String,
}

impl TableRecord for Region {
    const TABLE: &'static str = "region";
    const FILE: &'static str = "region.tbl";
    const COLUMNS: &'static [&'static str] = &["r_regionkey", "r_name", "r_comment"];

    fn from_fields(fields: &Fields<'_>) -> TableResult<Self> {
        Ok(Self {
            key: fields.key(0)?,
            name: fields.string(1)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Nation {
    pub key: Key,
    pub name: String,
    pub region_key: Key,
}

impl TableRecord for Nation {
    const TABLE: &'static str = "nation";
    const FILE: &'static str = "nation.tbl";
    const COLUMNS: &'static [&'static str] =
        &["n_nationkey", "n_name", "n_regionkey", "n_comment"];

    fn from_fields(fields: &Fields<'_>) -> TableResult<Self> {
        Ok(Self {
            key: fields.key(0)?,
            name: fields.string(1)?,
            region_key: fields.key(2)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Supplier {
    pub key: Key,
    pub nation_key: Key,
}

impl TableRecord for Supplier {
    const TABLE: &'static str = "supplier";
    const FILE: &'static str = "supplier.tbl";
    const COLUMNS: &'static [&'static str] = &[
        "s_suppkey",
        "s_name",
        "s_address",
        "s_nationkey",
        "s_phone",
        "s_acctbal",
        "s_comment",
    ];

    fn from_fields(fields: &Fields<'_>) -> TableResult<Self> {
        Ok(Self {
            key: fields.key(0)?,
            nation_key: fields.key(3)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub key: Key,
    pub nation_key: Key,
}

impl TableRecord for Customer {
    const TABLE: &'static str = "customer";
    const FILE: &'static str = "customer.tbl";
    const COLUMNS: &'static [&'static str] = &[
        "c_custkey",
        "c_name",
        "c_address",
        "c_nationkey",
        "c_phone",
        "c_acctbal",
        "c_mktsegment",
        "c_comment",
    ];

    fn from_fields(fields: &Fields<'_>) -> TableResult<Self> {
        Ok(Self {
            key: fields.key(0)?,
            nation_key: fields.key(3)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub key: Key,
    pub customer_key: Key,
    pub order_date: OrderDate,
}

impl TableRecord for Order {
    const TABLE: &'static str = "orders";
    const FILE: &'static str = "orders.tbl";
    const COLUMNS: &'static [&'static str] = &[
        "o_orderkey",
        "o_custkey",
        "o_orderstatus",
        "o_totalprice",
        "o_orderdate",
        "o_orderpriority",
        "o_clerk",
        "o_shippriority",
        "o_comment",
    ];

    fn from_fields(fields: &Fields<'_>) -> TableResult<Self> {
        Ok(Self {
            key: fields.key(0)?,
            customer_key: fields.key(1)?,
            order_date: fields.date(4)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lineitem {
    pub order_key: Key,
    pub supplier_key: Key,
    pub extended_price: f64,
    pub discount: f64,
}

impl Lineitem {
    /// `extended_price * (1 - discount)`
    pub fn revenue(&self) -> f64 {
        self.extended_price * (1.0 - self.discount)
    }
}

impl TableRecord for Lineitem {
    const TABLE: &'static str = "lineitem";
    const FILE: &'static str = "lineitem.tbl";
    const COLUMNS: &'static [&'static str] = &[
        "l_orderkey",
        "l_partkey",
        "l_suppkey",
        "l_linenumber",
        "l_quantity",
        "l_extendedprice",
        "l_discount",
        "l_tax",
        "l_returnflag",
        "l_linestatus",
        "l_shipdate",
        "l_commitdate",
        "l_receiptdate",
        "l_shipinstruct",
        "l_shipmode",
        "l_comment",
    ];

    fn from_fields(fields: &Fields<'_>) -> TableResult<Self> {
        Ok(Self {
            order_key: fields.key(0)?,
            supplier_key: fields.key(2)?,
            extended_price: fields.amount(5)?,
            discount: fields.fraction(6)?,
        })
    }
}
