//! Order Model

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order status
///
/// Only ever advances pending → processing → {completed | rejected};
/// the orchestrator never moves a status backwards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Rejected,
}

/// Discount kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    Membership,
    Volume,
    Amount,
    Other,
}

/// A single applied discount
///
/// Discounts accumulate in order of application; amounts are additive
/// and never replace previously applied discounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discount {
    pub code: String,
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    /// Discount rate as a fraction (e.g. 0.15)
    pub percentage: Option<f64>,
    /// Discount amount in currency unit, rounded to 2 decimal places
    pub amount: Option<f64>,
    pub description: Option<String>,
}

/// Order line item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    /// Quantity; must be > 0, enforced by validation rather than the type
    pub quantity: i64,
    /// Unit price, set by the price calculation filter
    pub unit_price: Option<f64>,
    /// Line total (`unit_price * quantity`), set alongside `unit_price`
    pub total_price: Option<f64>,
}

impl OrderItem {
    pub fn new(product_id: impl Into<String>, quantity: i64) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            unit_price: None,
            total_price: None,
        }
    }
}

/// Order entity
///
/// The computed fields (`subtotal`, `discounts`, `taxes`, `shipping`,
/// `total`) start absent and are filled in by the pipeline filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    pub items: Vec<OrderItem>,
    pub subtotal: Option<f64>,
    pub discounts: Option<Vec<Discount>>,
    pub taxes: Option<f64>,
    pub shipping: Option<f64>,
    pub total: Option<f64>,
    pub status: OrderStatus,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(id: impl Into<String>, customer_id: impl Into<String>, items: Vec<OrderItem>) -> Self {
        Self {
            id: id.into(),
            customer_id: customer_id.into(),
            items,
            subtotal: None,
            discounts: None,
            taxes: None,
            shipping: None,
            total: None,
            status: OrderStatus::Pending,
            metadata: HashMap::new(),
            created_at: Utc::now(),
        }
    }

    /// Total item quantity across the order
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}
