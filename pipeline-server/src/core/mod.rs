//! Server configuration, state and error responses

pub mod config;
pub mod error;
pub mod state;

pub use config::Config;
pub use error::{ServerError, ServerResult};
pub use state::ServerState;
