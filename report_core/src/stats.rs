//! # Statistics Aggregator
//!
//! Reduces a material list into the figures a report is built from. Stats
//! are computed once at the start of a report and never recomputed.
//!
//! ## Example
//!
//! ```rust
//! use report_core::materials::{Material, MaterialCategory, Unit};
//! use report_core::stats::compute_stats;
//!
//! let materials = vec![
//!     Material::new("Cement", MaterialCategory::Construction, Unit::Kg, 1000.0, 0.25),
//!     Material::new("Cable 2.5mm", MaterialCategory::Electrical, Unit::Meter, 200.0, 0.8),
//! ];
//!
//! let stats = compute_stats(&materials);
//! assert_eq!(stats.count, 2);
//! assert_eq!(stats.total, 410.0);
//! assert_eq!(stats.most_expensive.unwrap().name, "Cement");
//! ```

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::materials::{Material, MaterialCategory};

/// Per-category slice of the totals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryStats {
    pub count: usize,
    pub total: f64,
}

/// Aggregate figures for one material list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Sum of effective total prices
    pub total: f64,
    pub count: usize,
    /// `total / count`, 0 for an empty list
    pub average: f64,
    /// Only categories that have at least one material, in category order
    pub categories: BTreeMap<MaterialCategory, CategoryStats>,
    pub most_expensive: Option<Material>,
    pub least_expensive: Option<Material>,
    /// Distinct non-blank supplier names (case-insensitive)
    pub supplier_count: usize,
}

impl Stats {
    pub fn categories_used(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Share of the grand total held by a category, in percent.
    pub fn category_share(&self, category: MaterialCategory) -> f64 {
        match self.categories.get(&category) {
            Some(c) if self.total > 0.0 => c.total / self.total * 100.0,
            _ => 0.0,
        }
    }
}

/// Compute statistics over a material list.
///
/// Empty input yields zeros and no extremes. Most/least expensive come from
/// one stable sort on total price (descending): the first and last entries.
/// Equal prices keep input order, so the most expensive of a tie is the one
/// supplied first and the least expensive of a tie is the one supplied last.
pub fn compute_stats(materials: &[Material]) -> Stats {
    let mut total = 0.0;
    let mut categories: BTreeMap<MaterialCategory, CategoryStats> = BTreeMap::new();
    let mut suppliers = BTreeSet::new();

    for material in materials {
        let amount = material.effective_total();
        total += amount;

        let entry = categories.entry(material.category).or_default();
        entry.count += 1;
        entry.total += amount;

        if let Some(supplier) = material.supplier_name() {
            suppliers.insert(supplier.to_lowercase());
        }
    }

    let count = materials.len();
    let average = if count == 0 { 0.0 } else { total / count as f64 };

    let mut ranked: Vec<&Material> = materials.iter().collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.effective_total().total_cmp(&a.effective_total()));

    Stats {
        total,
        count,
        average,
        categories,
        most_expensive: ranked.first().map(|m| (*m).clone()),
        least_expensive: ranked.last().map(|m| (*m).clone()),
        supplier_count: suppliers.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::Unit;

    fn priced(name: &str, category: MaterialCategory, total: f64) -> Material {
        Material::new(name, category, Unit::Unit, 1.0, total)
    }

    #[test]
    fn test_empty_input() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.total, 0.0);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.average, 0.0);
        assert!(stats.categories.is_empty());
        assert!(stats.most_expensive.is_none());
        assert!(stats.least_expensive.is_none());
        assert!(stats.is_empty());
    }

    #[test]
    fn test_category_totals_partition_grand_total() {
        let materials = vec![
            priced("a", MaterialCategory::Construction, 120.5),
            priced("b", MaterialCategory::Electrical, 80.25),
            priced("c", MaterialCategory::Construction, 10.0),
            priced("d", MaterialCategory::Other, 3.0),
            priced("e", MaterialCategory::Plumbing, 0.0),
        ];
        let stats = compute_stats(&materials);
        let sum: f64 = stats.categories.values().map(|c| c.total).sum();
        assert!((sum - stats.total).abs() < 1e-9);
        let count: usize = stats.categories.values().map(|c| c.count).sum();
        assert_eq!(count, stats.count);
        assert_eq!(stats.categories[&MaterialCategory::Construction].count, 2);
        assert_eq!(stats.categories_used(), 4);
    }

    #[test]
    fn test_totals_are_order_independent() {
        let mut materials = vec![
            priced("a", MaterialCategory::Construction, 5.0),
            priced("b", MaterialCategory::Finishing, 7.0),
            priced("c", MaterialCategory::Other, 11.0),
        ];
        let forward = compute_stats(&materials);
        materials.reverse();
        let backward = compute_stats(&materials);
        assert_eq!(forward.total, backward.total);
        assert_eq!(forward.count, backward.count);
        assert_eq!(forward.average, backward.average);
    }

    #[test]
    fn test_most_expensive_tie_goes_to_first() {
        let materials = vec![
            priced("cheap", MaterialCategory::Other, 1.0),
            priced("first-top", MaterialCategory::Other, 50.0),
            priced("second-top", MaterialCategory::Other, 50.0),
        ];
        let stats = compute_stats(&materials);
        assert_eq!(stats.most_expensive.unwrap().name, "first-top");
        assert_eq!(stats.least_expensive.unwrap().name, "cheap");
    }

    #[test]
    fn test_least_expensive_tie_is_last_of_stable_sort() {
        let materials = vec![
            priced("low-1", MaterialCategory::Other, 2.0),
            priced("high", MaterialCategory::Other, 9.0),
            priced("low-2", MaterialCategory::Other, 2.0),
        ];
        let stats = compute_stats(&materials);
        assert_eq!(stats.least_expensive.unwrap().name, "low-2");
    }

    #[test]
    fn test_malformed_totals_contribute_zero() {
        let materials = vec![
            priced("ok", MaterialCategory::Construction, 100.0),
            priced("bad", MaterialCategory::Construction, 1.0).with_total_price(f64::NAN),
            priced("neg", MaterialCategory::Construction, 1.0).with_total_price(-40.0),
        ];
        let stats = compute_stats(&materials);
        assert_eq!(stats.total, 100.0);
        assert_eq!(stats.count, 3);
        assert!((stats.average - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.most_expensive.unwrap().name, "ok");
    }

    #[test]
    fn test_supplier_count_is_case_insensitive() {
        let materials = vec![
            priced("a", MaterialCategory::Other, 1.0).with_supplier("SOMACIM"),
            priced("b", MaterialCategory::Other, 1.0).with_supplier("somacim "),
            priced("c", MaterialCategory::Other, 1.0).with_supplier("Hydro Sud"),
            priced("d", MaterialCategory::Other, 1.0),
        ];
        assert_eq!(compute_stats(&materials).supplier_count, 2);
    }

    #[test]
    fn test_budget_example_totals() {
        let materials = vec![
            priced("slab", MaterialCategory::Construction, 600.0),
            priced("walls", MaterialCategory::Construction, 600.0),
        ];
        let stats = compute_stats(&materials);
        assert_eq!(stats.total, 1200.0);
        assert_eq!(stats.average, 600.0);
        assert_eq!(stats.category_share(MaterialCategory::Construction), 100.0);
    }
}
