//! Order Pipeline Server
//!
//! Runs customer orders through an ordered chain of processing filters
//! (validation, pricing, discounting, taxation, shipping, payment
//! simulation) and exposes the result over a small HTTP API.
//!
//! # Module structure
//!
//! ```text
//! pipeline-server/src/
//! ├── core/          # server config, state, error responses
//! ├── pipeline/      # orchestrator, filter trait, context, money math
//! ├── filters/       # the business-rule filter implementations
//! ├── store/         # data provider trait + in-memory implementation
//! ├── routes/        # HTTP routes and middleware assembly
//! └── utils/         # logging setup
//! ```

pub mod core;
pub mod filters;
pub mod pipeline;
pub mod routes;
pub mod store;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, ServerState};
pub use pipeline::{
    FilterError, FilterResult, OrderFilter, OrderPipeline, PipelineResult, ProcessingContext,
};
pub use store::{DataProvider, InMemoryStore};
pub use utils::logger::init_logger;
