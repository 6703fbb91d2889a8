//! Filter trait and per-filter result types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::Order;
use thiserror::Error;

use super::context::ProcessingContext;

/// Unexpected runtime failure inside a filter
///
/// Business rule violations are not errors: filters report those as
/// string messages inside a failing [`FilterResult`]. This type only
/// covers genuinely unexpected conditions (e.g. a data provider fault);
/// the orchestrator halts the chain and preserves the message in the
/// aggregated result list.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("data provider error: {0}")]
    Provider(#[from] anyhow::Error),
}

/// Outcome of a single filter invocation, immutable once created
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterResult {
    pub success: bool,
    /// The (possibly augmented) order that supersedes the previous state
    pub order: Order,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub name: String,
    pub duration_ms: u64,
}

impl FilterResult {
    /// Successful result carrying the new order state
    pub fn ok(name: &str, order: Order, started: std::time::Instant) -> Self {
        Self::ok_with_warnings(name, order, started, Vec::new())
    }

    /// Successful result with non-fatal warnings (e.g. low stock)
    pub fn ok_with_warnings(
        name: &str,
        order: Order,
        started: std::time::Instant,
        warnings: Vec<String>,
    ) -> Self {
        Self {
            success: true,
            order,
            errors: Vec::new(),
            warnings,
            name: name.to_string(),
            duration_ms: started.elapsed().as_millis() as u64,
        }
    }

    /// Failed result; the order is passed through unchanged
    pub fn failed(
        name: &str,
        order: Order,
        started: std::time::Instant,
        errors: Vec<String>,
    ) -> Self {
        Self {
            success: false,
            order,
            errors,
            warnings: Vec::new(),
            name: name.to_string(),
            duration_ms: started.elapsed().as_millis() as u64,
        }
    }
}

/// A named, order-transforming pipeline step
///
/// Filters are stateless across calls: they receive the current working
/// order by value and return a new order state inside the result. They
/// must not rely on anything but the order and the per-run context.
#[async_trait]
pub trait OrderFilter: Send + Sync {
    fn name(&self) -> &'static str;

    async fn process(
        &self,
        order: Order,
        ctx: &ProcessingContext,
    ) -> Result<FilterResult, FilterError>;
}
