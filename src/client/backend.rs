//! Execution strategy shared by local and remote modes.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CrawlOptions, CrawlResult, MapOptions, MapResult, ScrapeConfig, ScrapeResult};

/// Something that can run validated operations.
///
/// Implementations receive options that already passed validation and a URL
/// that passed the non-empty guard.
#[async_trait]
pub trait CrawlBackend: Send + Sync {
    async fn scrape(&self, url: &str, options: ScrapeConfig) -> Result<ScrapeResult>;

    async fn map(&self, url: &str, options: MapOptions) -> Result<MapResult>;

    async fn crawl(&self, url: &str, options: CrawlOptions) -> Result<CrawlResult>;
}
