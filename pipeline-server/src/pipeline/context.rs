//! Per-run processing context

use std::sync::Arc;

use chrono::{DateTime, Utc};
use shared::{Customer, PipelineConfig, Product};

use super::filter::FilterError;
use crate::store::DataProvider;

/// Bundle of collaborators visible to every filter during one run
///
/// Constructed once per pipeline invocation; the configuration it carries
/// has already passed through [`PipelineConfig::normalize`].
pub struct ProcessingContext {
    provider: Arc<dyn DataProvider>,
    pub config: PipelineConfig,
}

impl ProcessingContext {
    pub fn new(provider: Arc<dyn DataProvider>, config: PipelineConfig) -> Self {
        Self { provider, config }
    }

    pub async fn customer_by_id(&self, id: &str) -> Result<Option<Customer>, FilterError> {
        Ok(self.provider.customer_by_id(id).await?)
    }

    pub async fn product_by_id(&self, id: &str) -> Result<Option<Product>, FilterError> {
        Ok(self.provider.product_by_id(id).await?)
    }

    /// Current wall-clock time
    pub fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
