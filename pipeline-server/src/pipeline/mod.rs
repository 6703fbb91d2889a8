//! Filter pipeline engine
//!
//! The orchestrator holds an ordered filter chain and runs a single order
//! through it sequentially. Each filter fully completes (including any
//! data-provider suspension) before the next begins; later filters always
//! observe the fully-applied effects of earlier ones.

pub mod context;
pub mod filter;
pub mod money;

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use shared::{Order, OrderStatus, PipelineConfig};

pub use context::ProcessingContext;
pub use filter::{FilterError, FilterResult, OrderFilter};

use crate::store::DataProvider;

/// Aggregated outcome of one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    pub success: bool,
    pub final_order: Order,
    /// Results of every filter invoked so far, in execution order
    pub filter_results: Vec<FilterResult>,
    pub execution_time_ms: u64,
    /// Name of the filter that terminated the chain, set on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_at: Option<String>,
}

/// Pipeline orchestrator
///
/// Owns the filter chain and the injected data provider. The chain can be
/// extended or pruned via [`add_filter`](Self::add_filter) /
/// [`remove_filter`](Self::remove_filter); per-run enable/disable
/// overrides come from the configuration instead and never mutate the
/// chain itself.
pub struct OrderPipeline {
    provider: Arc<dyn DataProvider>,
    filters: Vec<Arc<dyn OrderFilter>>,
}

impl OrderPipeline {
    /// Empty pipeline with no filters registered
    pub fn new(provider: Arc<dyn DataProvider>) -> Self {
        Self {
            provider,
            filters: Vec::new(),
        }
    }

    /// The master chain with all nine filters in declaration order.
    ///
    /// TaxCalculation is registered before ShippingCost: both recompute
    /// the order total from the fields set so far, so the shipping
    /// filter, running last of the two, produces the authoritative total.
    pub fn master(provider: Arc<dyn DataProvider>) -> Self {
        use crate::filters::{
            CustomerValidationFilter, DataIntegrityFilter, MembershipDiscountFilter,
            PaymentProcessingFilter, PriceCalculationFilter, ProductValidationFilter,
            ShippingCostFilter, TaxCalculationFilter, VolumeDiscountFilter,
        };

        let mut pipeline = Self::new(provider);
        pipeline.add_filter(Arc::new(DataIntegrityFilter));
        pipeline.add_filter(Arc::new(CustomerValidationFilter));
        pipeline.add_filter(Arc::new(ProductValidationFilter));
        pipeline.add_filter(Arc::new(PriceCalculationFilter));
        pipeline.add_filter(Arc::new(MembershipDiscountFilter));
        pipeline.add_filter(Arc::new(VolumeDiscountFilter));
        pipeline.add_filter(Arc::new(TaxCalculationFilter));
        pipeline.add_filter(Arc::new(ShippingCostFilter));
        pipeline.add_filter(Arc::new(PaymentProcessingFilter));
        pipeline
    }

    /// Append a filter to the end of the active chain
    pub fn add_filter(&mut self, filter: Arc<dyn OrderFilter>) {
        self.filters.push(filter);
    }

    /// Remove a filter from the chain by name
    pub fn remove_filter(&mut self, name: &str) {
        self.filters.retain(|f| f.name() != name);
    }

    pub fn filter_names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Run an order through the chain.
    ///
    /// The working order starts as the caller's order with status forced
    /// to `processing`; each successful filter's returned order supersedes
    /// it. The chain short-circuits at the first failing filter, which
    /// rejects the order.
    pub async fn process(&self, order: Order, mut config: PipelineConfig) -> PipelineResult {
        let started = Instant::now();
        config.normalize();

        let ctx = ProcessingContext::new(self.provider.clone(), config);
        let mut current = Order {
            status: OrderStatus::Processing,
            ..order
        };
        let mut results: Vec<FilterResult> = Vec::new();

        for filter in &self.filters {
            let name = filter.name();
            if !ctx.config.filter_enabled(name) {
                tracing::debug!(filter = name, order_id = %current.id, "Filter disabled, skipping");
                continue;
            }

            let filter_started = Instant::now();
            match filter.process(current.clone(), &ctx).await {
                Ok(result) => {
                    if !result.success {
                        tracing::warn!(
                            filter = name,
                            order_id = %current.id,
                            errors = ?result.errors,
                            "Filter rejected order"
                        );
                        results.push(result);
                        return self.rejected(current, results, started, name);
                    }
                    current = result.order.clone();
                    results.push(result);
                }
                Err(err) => {
                    tracing::error!(
                        filter = name,
                        order_id = %current.id,
                        error = %err,
                        "Filter failed unexpectedly"
                    );
                    results.push(FilterResult::failed(
                        name,
                        current.clone(),
                        filter_started,
                        vec![err.to_string()],
                    ));
                    return self.rejected(current, results, started, name);
                }
            }
        }

        current.status = OrderStatus::Completed;
        PipelineResult {
            success: true,
            final_order: current,
            filter_results: results,
            execution_time_ms: started.elapsed().as_millis() as u64,
            failed_at: None,
        }
    }

    fn rejected(
        &self,
        mut order: Order,
        results: Vec<FilterResult>,
        started: Instant,
        failed_at: &str,
    ) -> PipelineResult {
        order.status = OrderStatus::Rejected;
        PipelineResult {
            success: false,
            final_order: order,
            filter_results: results,
            execution_time_ms: started.elapsed().as_millis() as u64,
            failed_at: Some(failed_at.to_string()),
        }
    }
}
