//! Product Model

use serde::{Deserialize, Serialize};

/// Product category, used for category-level tax rates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    General,
    Food,
    Electronics,
    Clothing,
    Service,
}

/// Product entity (read-only to the pipeline)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: ProductCategory,
    /// Unit price in currency unit
    pub price: f64,
    /// Available stock quantity
    pub stock: i64,
    /// Tax rate override (fraction, e.g. 0.27); falls back to the
    /// configured category or default rate when absent
    pub tax_rate: Option<f64>,
}
