//! # Material Records
//!
//! Material line items belonging to one project. The list handed to the
//! report engine is already filtered and ordered by the caller; the engine
//! keeps that order everywhere (tables, tie-breaks, grouping).
//!
//! ## JSON Shape
//!
//! ```json
//! {
//!   "name": "Cement CEM II 42.5",
//!   "category": "construction",
//!   "unit": "kg",
//!   "quantity": 500,
//!   "pricePerUnit": 0.25,
//!   "totalPrice": 125,
//!   "supplier": "SOMACIM",
//!   "createdAt": "2025-03-02T10:00:00Z"
//! }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use report_core::materials::{Material, MaterialCategory, Unit};
//!
//! let rebar = Material::new("Rebar 12mm", MaterialCategory::Construction, Unit::Ton, 2.0, 650.0);
//! assert_eq!(rebar.total_price, 1300.0);
//! ```

pub mod category;
pub mod unit;

pub use category::MaterialCategory;
pub use unit::Unit;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::numeric::{coerce_amount, lenient_f64, nan};

/// One material line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub name: String,

    /// Missing or unknown categories read as [`MaterialCategory::Other`]
    #[serde(default)]
    pub category: MaterialCategory,

    pub unit: Unit,

    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub quantity: f64,

    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub price_per_unit: f64,

    /// quantity × price_per_unit, computed upstream
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub total_price: f64,

    #[serde(default)]
    pub supplier: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Material {
    /// Create a material with `total_price = quantity × price_per_unit`.
    pub fn new(
        name: impl Into<String>,
        category: MaterialCategory,
        unit: Unit,
        quantity: f64,
        price_per_unit: f64,
    ) -> Self {
        Material {
            name: name.into(),
            category,
            unit,
            quantity,
            price_per_unit,
            total_price: quantity * price_per_unit,
            supplier: None,
            description: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Override the upstream total (used for records whose total disagrees
    /// with quantity × unit price).
    pub fn with_total_price(mut self, total_price: f64) -> Self {
        self.total_price = total_price;
        self
    }

    /// Total price as used in statistics; malformed values count as zero.
    pub fn effective_total(&self) -> f64 {
        coerce_amount(self.total_price)
    }

    pub fn effective_quantity(&self) -> f64 {
        coerce_amount(self.quantity)
    }

    pub fn effective_unit_price(&self) -> f64 {
        coerce_amount(self.price_per_unit)
    }

    /// Supplier name if present and not blank.
    pub fn supplier_name(&self) -> Option<&str> {
        self.supplier.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{
            "name": "PVC pipe 50mm",
            "unit": "meter",
            "quantity": 120,
            "pricePerUnit": 1.5,
            "totalPrice": 180,
            "createdAt": "2025-03-02T10:00:00Z"
        }"#;
        let m: Material = serde_json::from_str(json).unwrap();
        assert_eq!(m.category, MaterialCategory::Other);
        assert_eq!(m.unit, Unit::Meter);
        assert_eq!(m.effective_total(), 180.0);
        assert!(m.supplier_name().is_none());
    }

    #[test]
    fn test_malformed_total_counts_as_zero() {
        let json = r#"{
            "name": "Paint",
            "category": "finishing",
            "unit": "liter",
            "quantity": 10,
            "pricePerUnit": 4,
            "totalPrice": "n/a",
            "createdAt": "2025-03-02T10:00:00Z"
        }"#;
        let m: Material = serde_json::from_str(json).unwrap();
        assert!(m.total_price.is_nan());
        assert_eq!(m.effective_total(), 0.0);
    }

    #[test]
    fn test_blank_supplier_is_absent() {
        let m = Material::new("Sand", MaterialCategory::Construction, Unit::M3, 3.0, 20.0)
            .with_supplier("   ");
        assert!(m.supplier_name().is_none());
    }
}
