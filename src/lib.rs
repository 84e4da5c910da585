// Weaviate Spy - terminal inspector for vector database collections

pub mod api;
pub mod cli;
pub mod config;
pub mod models;
pub mod presenter;
pub mod schema;
pub mod search;
pub mod tui;
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use types::{SpyError, SpyResult};
