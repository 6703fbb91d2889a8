//! Pipeline configuration
//!
//! Configuration is supplied wholesale per pipeline run. Every optional
//! field is defaulted at a single boundary (`PipelineConfig::normalize`)
//! before the run starts; filters read fully-resolved values and never
//! re-derive defaults ad hoc.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{MembershipTier, ProductCategory};

/// Default tax rate applied when neither a category rate nor a product
/// override matches (21% VAT)
pub const DEFAULT_TAX_RATE: f64 = 0.21;

/// Tax rate configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaxConfig {
    /// Fallback rate (fraction, e.g. 0.21)
    pub default_rate: f64,
    /// Per-category rate overrides
    pub category_rates: HashMap<ProductCategory, f64>,
    /// Regional offset: taxes are credited by `discount_total * regional_rate`
    pub regional_rate: f64,
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            default_rate: DEFAULT_TAX_RATE,
            category_rates: HashMap::new(),
            regional_rate: 0.0,
        }
    }
}

/// One (threshold, rate) entry of a volume discount table
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RateTier {
    pub threshold: f64,
    pub rate: f64,
}

/// Volume discount tables
///
/// Both tables are "last qualifying wins": scanned in ascending threshold
/// order, the highest strictly-exceeded threshold determines the rate.
/// The two tables' winners are combined by taking the maximum.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeConfig {
    /// Keyed by total item count across the order
    pub items: Vec<RateTier>,
    /// Keyed by order subtotal
    pub amount: Vec<RateTier>,
}

/// Discount rule configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscountConfig {
    /// Membership tier -> discount rate (fraction)
    pub membership: HashMap<MembershipTier, f64>,
    pub volume: VolumeConfig,
}

/// One (threshold, amount) shipping tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShippingTier {
    pub threshold: f64,
    pub amount: f64,
}

/// Shipping cost configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShippingConfig {
    /// Default shipping cost when no tier matches
    pub flat_rate: f64,
    /// Subtotal at or above which shipping is forced to zero
    pub free_threshold: Option<f64>,
    /// Tiered table: highest threshold at or below the subtotal wins
    pub tiered: Vec<ShippingTier>,
}

/// Payment simulation mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    #[default]
    Success,
    Fail,
    Timeout,
}

/// Payment simulation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentConfig {
    pub simulate: PaymentMode,
    pub timeout_ms: u64,
}

/// Per-run pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PipelineConfig {
    /// Explicit enable/disable overrides; a filter mapped to `false` is
    /// skipped without recording a result
    pub enabled_filters: HashMap<String, bool>,
    pub tax: TaxConfig,
    pub discounts: DiscountConfig,
    pub shipping: ShippingConfig,
    pub payment: PaymentConfig,
}

impl PipelineConfig {
    /// Resolve the configuration for a run.
    ///
    /// Sorts every threshold table ascending so the filters' last-qualifying
    /// scans are well defined regardless of input order. Missing sections
    /// and fields were already defaulted during deserialization.
    pub fn normalize(&mut self) {
        self.discounts
            .volume
            .items
            .sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
        self.discounts
            .volume
            .amount
            .sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
        self.shipping
            .tiered
            .sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
    }

    /// Whether a filter is enabled for this run (enabled unless explicitly
    /// mapped to `false`)
    pub fn filter_enabled(&self, name: &str) -> bool {
        self.enabled_filters.get(name).copied().unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config: PipelineConfig = serde_json::from_str(r#"{"enabledFilters":{}}"#).unwrap();
        assert_eq!(config.tax.default_rate, DEFAULT_TAX_RATE);
        assert_eq!(config.tax.regional_rate, 0.0);
        assert_eq!(config.shipping.flat_rate, 0.0);
        assert!(config.shipping.free_threshold.is_none());
        assert_eq!(config.payment.simulate, PaymentMode::Success);
        assert_eq!(config.payment.timeout_ms, 0);
    }

    #[test]
    fn test_wire_format_matches_original_json() {
        let config: PipelineConfig = serde_json::from_str(
            r#"{
                "enabledFilters": { "ShippingCostFilter": false },
                "tax": { "defaultRate": 0.21, "categoryRates": { "food": 0.1 }, "regionalRate": 0.02 },
                "discounts": {
                    "membership": { "gold": 0.15 },
                    "volume": {
                        "items": [ { "threshold": 10, "rate": 0.05 } ],
                        "amount": [ { "threshold": 1000, "rate": 0.05 } ]
                    }
                },
                "shipping": { "flatRate": 10, "freeThreshold": 300, "tiered": [ { "threshold": 100, "amount": 5 } ] },
                "payment": { "simulate": "timeout", "timeoutMs": 50 }
            }"#,
        )
        .unwrap();

        assert!(!config.filter_enabled("ShippingCostFilter"));
        assert!(config.filter_enabled("TaxCalculationFilter"));
        assert_eq!(
            config
                .tax
                .category_rates
                .get(&crate::models::ProductCategory::Food),
            Some(&0.1)
        );
        assert_eq!(
            config.discounts.membership.get(&MembershipTier::Gold),
            Some(&0.15)
        );
        assert_eq!(config.shipping.free_threshold, Some(300.0));
        assert_eq!(config.payment.simulate, PaymentMode::Timeout);
        assert_eq!(config.payment.timeout_ms, 50);
    }

    #[test]
    fn test_normalize_sorts_threshold_tables() {
        let mut config = PipelineConfig::default();
        config.discounts.volume.items = vec![
            RateTier { threshold: 50.0, rate: 0.1 },
            RateTier { threshold: 10.0, rate: 0.05 },
        ];
        config.shipping.tiered = vec![
            ShippingTier { threshold: 200.0, amount: 0.0 },
            ShippingTier { threshold: 100.0, amount: 5.0 },
        ];

        config.normalize();

        assert_eq!(config.discounts.volume.items[0].threshold, 10.0);
        assert_eq!(config.shipping.tiered[0].threshold, 100.0);
    }
}
