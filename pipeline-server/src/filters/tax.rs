//! Tax calculation filter

use std::time::Instant;

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::Order;

use crate::pipeline::money::{discount_total, recompute_total, to_decimal, to_f64};
use crate::pipeline::{FilterError, FilterResult, OrderFilter, ProcessingContext};

/// Computes per-item taxes and a regional discount credit.
///
/// Rate precedence per item: configured category rate for the product's
/// category, else the product's own override, else the default rate.
/// The summed tax is then reduced by `discount_total * regional_rate`
/// and floored at zero. Also recomputes the order total from the fields
/// set so far; when the shipping filter runs later in the chain its own
/// recomputation supersedes this one.
pub struct TaxCalculationFilter;

#[async_trait]
impl OrderFilter for TaxCalculationFilter {
    fn name(&self) -> &'static str {
        "TaxCalculationFilter"
    }

    async fn process(
        &self,
        mut order: Order,
        ctx: &ProcessingContext,
    ) -> Result<FilterResult, FilterError> {
        let started = Instant::now();
        let tax_config = &ctx.config.tax;
        let mut taxes = Decimal::ZERO;

        for item in &order.items {
            // Items whose product vanished between validation and here
            // simply contribute no tax
            let Some(product) = ctx.product_by_id(&item.product_id).await? else {
                continue;
            };
            let rate = tax_config
                .category_rates
                .get(&product.category)
                .copied()
                .or(product.tax_rate)
                .unwrap_or(tax_config.default_rate);
            taxes += to_decimal(item.total_price.unwrap_or(0.0)) * to_decimal(rate);
        }

        let credit = discount_total(&order) * to_decimal(tax_config.regional_rate);
        taxes = (taxes - credit).max(Decimal::ZERO);

        order.taxes = Some(to_f64(taxes));
        order.total = Some(recompute_total(&order));

        Ok(FilterResult::ok(self.name(), order, started))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use shared::{Discount, DiscountKind, OrderItem, PipelineConfig, ProductCategory};
    use std::sync::Arc;

    fn context_with(config: PipelineConfig) -> ProcessingContext {
        ProcessingContext::new(Arc::new(InMemoryStore::with_demo_data()), config)
    }

    fn priced_item(product_id: &str, quantity: i64, unit_price: f64) -> OrderItem {
        OrderItem {
            product_id: product_id.into(),
            quantity,
            unit_price: Some(unit_price),
            total_price: Some(unit_price * quantity as f64),
        }
    }

    fn priced_order(subtotal: f64, items: Vec<OrderItem>) -> Order {
        let mut order = Order::new("o1", "c1", items);
        order.subtotal = Some(subtotal);
        order.discounts = Some(Vec::new());
        order
    }

    #[tokio::test]
    async fn test_rate_precedence_category_then_override_then_default() {
        let mut config = PipelineConfig::default();
        config
            .tax
            .category_rates
            .insert(ProductCategory::Food, 0.05);
        let ctx = context_with(config);

        // p3 is food: the category rate 0.05 beats its own 0.10 override;
        // p2 (electronics, unconfigured) falls back to its 0.27 override;
        // p1 (clothing, no override) falls back to the 0.21 default
        let order = priced_order(
            1245.0,
            vec![
                priced_item("p3", 10, 2.5),   // 25.00 * 0.05 = 1.25
                priced_item("p2", 1, 1200.0), // 1200.00 * 0.27 = 324.00
                priced_item("p1", 1, 20.0),   // 20.00 * 0.21 = 4.20
            ],
        );

        let result = TaxCalculationFilter.process(order, &ctx).await.unwrap();

        assert_eq!(result.order.taxes, Some(329.45));
    }

    #[tokio::test]
    async fn test_regional_credit_floors_at_zero() {
        let mut config = PipelineConfig::default();
        config.tax.regional_rate = 1.0;
        let ctx = context_with(config);

        let mut order = priced_order(40.0, vec![priced_item("p1", 2, 20.0)]);
        // Discounts exceed the raw tax of 8.40
        order.discounts = Some(vec![Discount {
            code: "MEM-GOLD".into(),
            kind: DiscountKind::Membership,
            percentage: Some(0.15),
            amount: Some(100.0),
            description: None,
        }]);

        let result = TaxCalculationFilter.process(order, &ctx).await.unwrap();

        assert_eq!(result.order.taxes, Some(0.0));
    }

    #[tokio::test]
    async fn test_total_reads_shipping_already_set() {
        let ctx = context_with(PipelineConfig::default());
        let mut order = priced_order(40.0, vec![priced_item("p1", 2, 20.0)]);
        order.shipping = Some(10.0);

        let result = TaxCalculationFilter.process(order, &ctx).await.unwrap();

        // taxes = 40 * 0.21 = 8.40; total = 40 - 0 + 10 + 8.40
        assert_eq!(result.order.taxes, Some(8.4));
        assert_eq!(result.order.total, Some(58.4));
    }

    #[tokio::test]
    async fn test_rerun_is_idempotent_on_rounded_order() {
        let ctx = context_with(PipelineConfig::default());
        let order = priced_order(40.0, vec![priced_item("p1", 2, 20.0)]);

        let once = TaxCalculationFilter.process(order, &ctx).await.unwrap().order;
        let twice = TaxCalculationFilter
            .process(once.clone(), &ctx)
            .await
            .unwrap()
            .order;

        assert_eq!(once.taxes, twice.taxes);
        assert_eq!(once.total, twice.total);
    }
}
