//! service-core: shared infrastructure for the proposal service.
//!
//! Error type and its HTTP rendering, base configuration loading, tracing
//! setup and the request middleware every router installs.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;

pub use async_trait;
pub use axum;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tower;
pub use tower_http;
pub use tracing;
