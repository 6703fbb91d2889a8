//! Pricing and discount filters
//!
//! PriceCalculation fills unit prices, line totals and the subtotal.
//! MembershipDiscount and VolumeDiscount append to the order's discount
//! sequence; amounts are additive and never replace earlier discounts.

use std::time::Instant;

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::{Discount, DiscountKind, Order};

use crate::pipeline::money::{to_decimal, to_f64};
use crate::pipeline::{FilterError, FilterResult, OrderFilter, ProcessingContext};

/// Resolves unit prices from the catalog and computes line totals and the
/// order subtotal
pub struct PriceCalculationFilter;

#[async_trait]
impl OrderFilter for PriceCalculationFilter {
    fn name(&self) -> &'static str {
        "PriceCalculationFilter"
    }

    async fn process(
        &self,
        mut order: Order,
        ctx: &ProcessingContext,
    ) -> Result<FilterResult, FilterError> {
        let started = Instant::now();
        let mut subtotal = Decimal::ZERO;
        let mut missing = None;

        for item in &mut order.items {
            let Some(product) = ctx.product_by_id(&item.product_id).await? else {
                missing = Some(item.product_id.clone());
                break;
            };
            let line_total = to_decimal(product.price) * Decimal::from(item.quantity);
            item.unit_price = Some(product.price);
            item.total_price = Some(to_f64(line_total));
            subtotal += line_total;
        }

        if let Some(product_id) = missing {
            return Ok(FilterResult::failed(
                self.name(),
                order,
                started,
                vec![format!("product {product_id} not found")],
            ));
        }

        order.subtotal = Some(to_f64(subtotal));
        // Later discount filters append; start the sequence here if absent
        order.discounts.get_or_insert_with(Vec::new);

        Ok(FilterResult::ok(self.name(), order, started))
    }
}

/// Applies the configured rate for the customer's membership tier
pub struct MembershipDiscountFilter;

#[async_trait]
impl OrderFilter for MembershipDiscountFilter {
    fn name(&self) -> &'static str {
        "MembershipDiscountFilter"
    }

    async fn process(
        &self,
        mut order: Order,
        ctx: &ProcessingContext,
    ) -> Result<FilterResult, FilterError> {
        let started = Instant::now();

        let Some(customer) = ctx.customer_by_id(&order.customer_id).await? else {
            return Ok(FilterResult::failed(
                self.name(),
                order,
                started,
                vec!["customer not found".to_string()],
            ));
        };

        let rate = ctx
            .config
            .discounts
            .membership
            .get(&customer.membership)
            .copied()
            .unwrap_or(0.0);
        let subtotal = order.subtotal.unwrap_or(0.0);

        if rate > 0.0 && subtotal > 0.0 {
            let amount = to_f64(to_decimal(subtotal) * to_decimal(rate));
            order
                .discounts
                .get_or_insert_with(Vec::new)
                .push(Discount {
                    code: format!("MEM-{}", customer.membership.code()),
                    kind: DiscountKind::Membership,
                    percentage: Some(rate),
                    amount: Some(amount),
                    description: Some("Membership discount".to_string()),
                });
            tracing::debug!(
                order_id = %order.id,
                tier = customer.membership.as_str(),
                rate,
                amount,
                "Applied membership discount"
            );
        }

        Ok(FilterResult::ok(self.name(), order, started))
    }
}

/// Applies the volume discount from the item-count and subtotal tables.
///
/// Each table is scanned in ascending threshold order; the highest
/// strictly-exceeded threshold wins within a table, and the two tables'
/// rates combine by taking the maximum.
pub struct VolumeDiscountFilter;

#[async_trait]
impl OrderFilter for VolumeDiscountFilter {
    fn name(&self) -> &'static str {
        "VolumeDiscountFilter"
    }

    async fn process(
        &self,
        mut order: Order,
        ctx: &ProcessingContext,
    ) -> Result<FilterResult, FilterError> {
        let started = Instant::now();

        let total_items = order.total_quantity();
        let subtotal = order.subtotal.unwrap_or(0.0);
        let volume = &ctx.config.discounts.volume;

        let mut rate = 0.0_f64;
        for tier in &volume.items {
            if total_items as f64 > tier.threshold {
                rate = tier.rate;
            }
        }
        for tier in &volume.amount {
            if subtotal > tier.threshold {
                rate = rate.max(tier.rate);
            }
        }

        if rate > 0.0 && subtotal > 0.0 {
            let amount = to_f64(to_decimal(subtotal) * to_decimal(rate));
            order
                .discounts
                .get_or_insert_with(Vec::new)
                .push(Discount {
                    code: format!("VOL-{}", (rate * 100.0).round() as i64),
                    kind: DiscountKind::Volume,
                    percentage: Some(rate),
                    amount: Some(amount),
                    description: Some("Volume discount".to_string()),
                });
            tracing::debug!(order_id = %order.id, rate, amount, "Applied volume discount");
        }

        Ok(FilterResult::ok(self.name(), order, started))
    }
}
