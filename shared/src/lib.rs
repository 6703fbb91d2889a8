//! Shared types for the order pipeline
//!
//! Domain models (orders, customers, products, discounts) and the
//! per-run pipeline configuration used by both the engine and the
//! HTTP transport.

pub mod config;
pub mod models;

// Re-exports
pub use config::{
    DiscountConfig, PaymentConfig, PaymentMode, PipelineConfig, RateTier, ShippingConfig,
    ShippingTier, TaxConfig, VolumeConfig,
};
pub use models::{
    Address, Customer, Discount, DiscountKind, MembershipTier, Order, OrderItem, OrderStatus,
    Product, ProductCategory,
};
pub use serde::{Deserialize, Serialize};
