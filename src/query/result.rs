//! Result types for query execution

use std::collections::HashMap;

use uuid::Uuid;

use super::cascade::CascadeStats;

/// Final revenue per nation.
///
/// Nations with no admitted lineitem are absent rather than present with a
/// zero total. Iteration order of the underlying map is unspecified; use
/// `sorted()` for a deterministic order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NationRevenue {
    totals: HashMap<String, f64>,
}

impl NationRevenue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to a nation's total, creating it at zero if absent
    pub fn add(&mut self, nation: &str, amount: f64) {
        match self.totals.get_mut(nation) {
            Some(total) => *total += amount,
            None => {
                self.totals.insert(nation.to_string(), amount);
            }
        }
    }

    pub fn get(&self, nation: &str) -> Option<f64> {
        self.totals.get(nation).copied()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Rows ordered by nation name, compared byte-wise
    pub fn sorted(&self) -> Vec<(&str, f64)> {
        let mut rows: Vec<(&str, f64)> = self
            .totals
            .iter()
            .map(|(name, total)| (name.as_str(), *total))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(b.0));
        rows
    }

    /// Sum over all nations
    pub fn total(&self) -> f64 {
        self.sorted().iter().map(|(_, v)| v).sum()
    }
}

impl FromIterator<(String, f64)> for NationRevenue {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut revenue = Self::new();
        for (nation, amount) in iter {
            revenue.add(&nation, amount);
        }
        revenue
    }
}

/// Scan-phase counters, summed over all workers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub workers: usize,
    pub rows_scanned: usize,
    pub rows_admitted: usize,
}

/// Everything a successful query produced
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub query_id: Uuid,
    pub revenue: NationRevenue,
    pub cascade: CascadeStats,
    pub scan: ScanSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_accumulates() {
        let mut revenue = NationRevenue::new();
        revenue.add("INDIA", 100.0);
        revenue.add("INDIA", 50.0);
        revenue.add("JAPAN", 1.0);

        assert_eq!(revenue.get("INDIA"), Some(150.0));
        assert_eq!(revenue.len(), 2);
        assert_eq!(revenue.get("CHINA"), None);
    }

    #[test]
    fn test_sorted_by_name() {
        let revenue: NationRevenue = vec![
            ("VIETNAM".to_string(), 1.0),
            ("CHINA".to_string(), 2.0),
            ("INDONESIA".to_string(), 3.0),
            ("INDIA".to_string(), 4.0),
        ]
        .into_iter()
        .collect();

        let names: Vec<&str> = revenue.sorted().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["CHINA", "INDIA", "INDONESIA", "VIETNAM"]);
    }

    #[test]
    fn test_sorted_is_byte_order() {
        let revenue: NationRevenue = vec![("b".to_string(), 1.0), ("B".to_string(), 1.0)]
            .into_iter()
            .collect();
        let names: Vec<&str> = revenue.sorted().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["B", "b"]);
    }

    #[test]
    fn test_empty() {
        let revenue = NationRevenue::new();
        assert!(revenue.is_empty());
        assert!(revenue.sorted().is_empty());
        assert_eq!(revenue.total(), 0.0);
    }
}
