//! Configuration module for scrape runs
//!
//! This module provides the `ScrapeConfig` struct, its type-safe builder and
//! the JSON file loader, with validation and sensible defaults.

// Sub-modules
pub mod builder;
pub mod getters;
mod loader;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::{ScrapeConfigBuilder, WithApiKey};
pub use types::ScrapeConfig;
