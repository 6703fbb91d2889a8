//! Shared server state

use std::sync::{Arc, RwLock};

use dashmap::DashMap;
use shared::PipelineConfig;

use crate::pipeline::{OrderPipeline, PipelineResult};
use crate::store::InMemoryStore;

/// State shared by all HTTP handlers
///
/// The data provider and the master pipeline are constructed once here
/// and injected everywhere else; there is no ambient global store.
#[derive(Clone)]
pub struct ServerState {
    /// Master pipeline with the injected data provider
    pub pipeline: Arc<OrderPipeline>,
    /// Outcome registry keyed by order id, written after every run
    pub statuses: Arc<DashMap<String, PipelineResult>>,
    /// Default pipeline configuration used when a request omits its own;
    /// replaced wholesale via the config endpoint, never merged
    pub default_config: Arc<RwLock<PipelineConfig>>,
}

impl ServerState {
    /// Build the state with the demo catalog
    pub fn initialize() -> Self {
        let store = Arc::new(InMemoryStore::with_demo_data());
        tracing::info!("In-memory store seeded with demo customers and products");

        Self {
            pipeline: Arc::new(OrderPipeline::master(store)),
            statuses: Arc::new(DashMap::new()),
            default_config: Arc::new(RwLock::new(PipelineConfig::default())),
        }
    }
}
