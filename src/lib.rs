//! Song recommendation server library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod catalog;
pub mod config;
pub mod recommend;
pub mod search;
pub mod server;

// Re-export commonly used types for convenience
pub use catalog::{Catalog, CatalogSettings};
pub use recommend::{Recommender, RecommenderSettings};
pub use server::{run_server, RequestsLoggingLevel, ServerConfig};
