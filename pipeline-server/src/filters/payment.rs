//! Payment processing filter (simulation)

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::json;
use shared::{Order, PaymentMode};

use crate::pipeline::{FilterError, FilterResult, OrderFilter, ProcessingContext};

/// Minimum simulated payment delay; the configured timeout never sleeps
/// less than this
const MIN_TIMEOUT_MS: u64 = 10;

/// Simulates the payment leg of the pipeline.
///
/// `success` stamps a captured-payment record into the order metadata,
/// `fail` declines without touching the order, and `timeout` suspends for
/// at least the configured timeout before failing. The timeout sleep is
/// the only deliberately blocking step in the whole chain.
pub struct PaymentProcessingFilter;

#[async_trait]
impl OrderFilter for PaymentProcessingFilter {
    fn name(&self) -> &'static str {
        "PaymentProcessingFilter"
    }

    async fn process(
        &self,
        mut order: Order,
        ctx: &ProcessingContext,
    ) -> Result<FilterResult, FilterError> {
        let started = Instant::now();
        let payment = &ctx.config.payment;

        match payment.simulate {
            PaymentMode::Timeout => {
                let delay = payment.timeout_ms.max(MIN_TIMEOUT_MS);
                tokio::time::sleep(Duration::from_millis(delay)).await;
                Ok(FilterResult::failed(
                    self.name(),
                    order,
                    started,
                    vec!["payment timeout".to_string()],
                ))
            }
            PaymentMode::Fail => Ok(FilterResult::failed(
                self.name(),
                order,
                started,
                vec!["payment declined".to_string()],
            )),
            PaymentMode::Success => {
                order.metadata.insert(
                    "payment".to_string(),
                    json!({
                        "status": "captured",
                        "at": ctx.now().to_rfc3339(),
                    }),
                );
                tracing::info!(order_id = %order.id, total = ?order.total, "Payment captured");
                Ok(FilterResult::ok(self.name(), order, started))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use shared::{OrderItem, PipelineConfig};
    use std::sync::Arc;

    fn context_with_mode(simulate: PaymentMode, timeout_ms: u64) -> ProcessingContext {
        let mut config = PipelineConfig::default();
        config.payment.simulate = simulate;
        config.payment.timeout_ms = timeout_ms;
        ProcessingContext::new(Arc::new(InMemoryStore::with_demo_data()), config)
    }

    fn order() -> Order {
        Order::new("o1", "c1", vec![OrderItem::new("p1", 1)])
    }

    #[tokio::test]
    async fn test_success_stamps_capture_metadata() {
        let ctx = context_with_mode(PaymentMode::Success, 0);

        let result = PaymentProcessingFilter.process(order(), &ctx).await.unwrap();

        assert!(result.success);
        let payment = &result.order.metadata["payment"];
        assert_eq!(payment["status"], "captured");
        assert!(payment["at"].is_string());
    }

    #[tokio::test]
    async fn test_fail_declines_without_mutation() {
        let ctx = context_with_mode(PaymentMode::Fail, 0);

        let result = PaymentProcessingFilter.process(order(), &ctx).await.unwrap();

        assert!(!result.success);
        assert_eq!(result.errors, vec!["payment declined"]);
        assert!(!result.order.metadata.contains_key("payment"));
    }

    #[tokio::test]
    async fn test_timeout_sleeps_at_least_the_configured_delay() {
        let ctx = context_with_mode(PaymentMode::Timeout, 50);
        let started = Instant::now();

        let result = PaymentProcessingFilter.process(order(), &ctx).await.unwrap();

        assert!(!result.success);
        assert_eq!(result.errors, vec!["payment timeout"]);
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_timeout_floor_applies_to_tiny_configs() {
        let ctx = context_with_mode(PaymentMode::Timeout, 0);
        let started = Instant::now();

        let result = PaymentProcessingFilter.process(order(), &ctx).await.unwrap();

        assert!(!result.success);
        assert!(started.elapsed() >= Duration::from_millis(MIN_TIMEOUT_MS));
    }
}
