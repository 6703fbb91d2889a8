//! End-to-end pipeline scenarios against the seeded demo store

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use pipeline_server::{InMemoryStore, OrderPipeline};
use shared::{
    MembershipTier, Order, OrderItem, OrderStatus, PaymentMode, PipelineConfig, RateTier,
};

fn demo_pipeline() -> OrderPipeline {
    OrderPipeline::master(Arc::new(InMemoryStore::with_demo_data()))
}

/// Reference configuration: 21% default tax with a 10% food rate, flat
/// shipping 10 free above 300, and the full membership/volume tables
fn reference_config() -> PipelineConfig {
    let mut config = PipelineConfig::default();
    config.tax.default_rate = 0.21;
    config
        .tax
        .category_rates
        .insert(shared::ProductCategory::Food, 0.1);
    config.shipping.flat_rate = 10.0;
    config.shipping.free_threshold = Some(300.0);
    config.discounts.membership = HashMap::from([
        (MembershipTier::Bronze, 0.05),
        (MembershipTier::Silver, 0.1),
        (MembershipTier::Gold, 0.15),
        (MembershipTier::Platinum, 0.2),
    ]);
    config.discounts.volume.items = vec![
        RateTier { threshold: 10.0, rate: 0.05 },
        RateTier { threshold: 50.0, rate: 0.1 },
    ];
    config.discounts.volume.amount = vec![
        RateTier { threshold: 1000.0, rate: 0.05 },
        RateTier { threshold: 5000.0, rate: 0.1 },
    ];
    config
}

fn pending_order(id: &str, customer_id: &str, items: Vec<OrderItem>) -> Order {
    Order::new(id, customer_id, items)
}

#[tokio::test]
async fn test_valid_order_completes_with_reference_numbers() {
    let pipeline = demo_pipeline();
    let order = pending_order(
        "o10",
        "c1",
        vec![OrderItem::new("p1", 12), OrderItem::new("p2", 1)],
    );

    let result = pipeline.process(order, reference_config()).await;

    assert!(result.success);
    assert!(result.failed_at.is_none());
    assert!(!result.filter_results.is_empty());

    let order = &result.final_order;
    assert_eq!(order.status, OrderStatus::Completed);

    // 12 * 20.00 + 1 * 1200.00
    assert_eq!(order.subtotal, Some(1440.0));

    // Gold membership: 1440 * 0.15; volume: 13 items > 10 and 1440 > 1000
    // both yield 0.05, so 1440 * 0.05
    let discounts = order.discounts.as_deref().unwrap();
    assert_eq!(discounts.len(), 2);
    assert_eq!(discounts[0].code, "MEM-GOLD");
    assert_eq!(discounts[0].amount, Some(216.0));
    assert_eq!(discounts[1].code, "VOL-5");
    assert_eq!(discounts[1].amount, Some(72.0));

    // Clothing falls back to 0.21, electronics to its 0.27 override:
    // 240 * 0.21 + 1200 * 0.27 = 50.40 + 324.00
    assert_eq!(order.taxes, Some(374.4));

    // Subtotal is over the free-shipping threshold
    assert_eq!(order.shipping, Some(0.0));

    // 1440 - 288 + 0 + 374.40
    assert_eq!(order.total, Some(1526.4));

    // Payment was captured
    assert_eq!(order.metadata["payment"]["status"], "captured");
}

#[tokio::test]
async fn test_unknown_customer_rejects_at_first_lookup() {
    let pipeline = demo_pipeline();
    let order = pending_order("o11", "unknown", vec![OrderItem::new("p1", 1)]);

    let result = pipeline.process(order, reference_config()).await;

    assert!(!result.success);
    assert_eq!(result.final_order.status, OrderStatus::Rejected);
    // CustomerValidationFilter is the first filter that looks up the customer
    assert_eq!(result.failed_at.as_deref(), Some("CustomerValidationFilter"));
    let last = result.filter_results.last().unwrap();
    assert_eq!(last.errors, vec!["customer not found"]);
}

#[tokio::test]
async fn test_payment_timeout_rejects_after_the_delay() {
    let pipeline = demo_pipeline();
    let order = pending_order("o12", "c1", vec![OrderItem::new("p1", 1)]);
    let mut config = reference_config();
    config.payment.simulate = PaymentMode::Timeout;
    config.payment.timeout_ms = 50;

    let started = Instant::now();
    let result = pipeline.process(order, config).await;

    assert!(!result.success);
    assert_eq!(result.failed_at.as_deref(), Some("PaymentProcessingFilter"));
    assert!(started.elapsed() >= Duration::from_millis(50));
    let last = result.filter_results.last().unwrap();
    assert_eq!(last.errors, vec!["payment timeout"]);
}

#[tokio::test]
async fn test_payment_declined_rejects_without_capture() {
    let pipeline = demo_pipeline();
    let order = pending_order("o13", "c1", vec![OrderItem::new("p1", 1)]);
    let mut config = reference_config();
    config.payment.simulate = PaymentMode::Fail;

    let result = pipeline.process(order, config).await;

    assert!(!result.success);
    assert_eq!(result.failed_at.as_deref(), Some("PaymentProcessingFilter"));
    assert!(!result.final_order.metadata.contains_key("payment"));
}

#[tokio::test]
async fn test_disabled_filters_leave_no_results() {
    let pipeline = demo_pipeline();
    let order = pending_order("o14", "c1", vec![OrderItem::new("p1", 2)]);
    let mut config = reference_config();
    config
        .enabled_filters
        .insert("MembershipDiscountFilter".to_string(), false);
    config
        .enabled_filters
        .insert("VolumeDiscountFilter".to_string(), false);

    let result = pipeline.process(order, config).await;

    assert!(result.success);
    let names: Vec<&str> = result
        .filter_results
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert!(!names.contains(&"MembershipDiscountFilter"));
    assert!(!names.contains(&"VolumeDiscountFilter"));
    assert!(result.final_order.discounts.as_deref().unwrap().is_empty());
}

#[tokio::test]
async fn test_shipping_after_tax_produces_authoritative_total() {
    let pipeline = demo_pipeline();
    // 2 * 20.00 = 40.00 subtotal, under the free threshold and without
    // any discount tier; flat rate applies
    let order = pending_order("o15", "c1", vec![OrderItem::new("p1", 2)]);
    let mut config = reference_config();
    config.discounts.membership.clear();

    let result = pipeline.process(order, config).await;

    assert!(result.success);
    let order = &result.final_order;
    assert_eq!(order.shipping, Some(10.0));
    // taxes = 40 * 0.21 = 8.40; total = 40 + 10 + 8.40
    assert_eq!(order.taxes, Some(8.4));
    assert_eq!(order.total, Some(58.4));
}
