// src/models/mod.rs

//! Domain models for the client.
//!
//! Validated configuration types, per-call option bundles, and the typed
//! results returned by each operation.

mod config;
mod operation;
mod options;
mod result;

// Re-export all public types
pub use config::{ClientConfig, CrawlConfig, Format, LinkType, MapConfig, ScrapeConfig, Viewport};
pub use operation::Operation;
pub use options::{CrawlOptions, MapOptions};
pub use result::{CrawlFailure, CrawlResult, MapLink, MapResult, PageMetadata, ScrapeResult};
