//! Shipping cost filter

use std::time::Instant;

use async_trait::async_trait;
use shared::Order;

use crate::pipeline::money::{recompute_total, round_money};
use crate::pipeline::{FilterError, FilterResult, OrderFilter, ProcessingContext};

/// Resolves shipping cost from the configured rules.
///
/// Starts from the flat rate; when a tiered table is configured, the
/// highest tier whose threshold is at or below the subtotal replaces it
/// (ascending scan, last qualifying wins, mirroring the volume-discount
/// tie-break). A met free-shipping threshold forces shipping to zero
/// regardless of tier. Recomputes the order total afterwards; in the
/// master chain this filter runs after tax, making its total the
/// authoritative one.
pub struct ShippingCostFilter;

#[async_trait]
impl OrderFilter for ShippingCostFilter {
    fn name(&self) -> &'static str {
        "ShippingCostFilter"
    }

    async fn process(
        &self,
        mut order: Order,
        ctx: &ProcessingContext,
    ) -> Result<FilterResult, FilterError> {
        let started = Instant::now();
        let subtotal = order.subtotal.unwrap_or(0.0);
        let config = &ctx.config.shipping;

        let mut shipping = config.flat_rate;
        if !config.tiered.is_empty() {
            let mut selected = 0.0;
            for tier in &config.tiered {
                if subtotal >= tier.threshold {
                    selected = tier.amount;
                }
            }
            shipping = selected;
        }
        if let Some(free_threshold) = config.free_threshold
            && subtotal >= free_threshold
        {
            shipping = 0.0;
        }

        order.shipping = Some(round_money(shipping));
        order.total = Some(recompute_total(&order));

        Ok(FilterResult::ok(self.name(), order, started))
    }
}
