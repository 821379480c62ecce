// src/client/local.rs

//! Local mode: forward calls to an in-process host binding.
//!
//! Host failures are flattened to a message-only [`BlessCrawlError::Binding`];
//! the host's own codes and causes are not carried over.

use std::sync::Arc;

use async_trait::async_trait;

use super::backend::CrawlBackend;
use crate::error::{BlessCrawlError, Result};
use crate::models::{CrawlOptions, CrawlResult, MapOptions, MapResult, ScrapeConfig, ScrapeResult};

/// Error type returned by host implementations.
pub type HostError = Box<dyn std::error::Error + Send + Sync>;

/// Message used when a host error has no text of its own.
pub const FALLBACK_MESSAGE: &str = "Unknown error in local binding";

/// Operation handle provided by the host environment.
#[async_trait]
pub trait HostBinding: Send + Sync {
    async fn scrape(
        &self,
        url: &str,
        options: &ScrapeConfig,
    ) -> std::result::Result<ScrapeResult, HostError>;

    async fn map(
        &self,
        url: &str,
        options: &MapOptions,
    ) -> std::result::Result<MapResult, HostError>;

    async fn crawl(
        &self,
        url: &str,
        options: &CrawlOptions,
    ) -> std::result::Result<CrawlResult, HostError>;
}

/// Host capability: constructs a binding from the client's scrape defaults.
pub trait HostRuntime: Send + Sync {
    fn construct(
        &self,
        defaults: &ScrapeConfig,
    ) -> std::result::Result<Arc<dyn HostBinding>, HostError>;
}

/// Backend that delegates to a host binding.
pub struct LocalBinding {
    handle: Arc<dyn HostBinding>,
}

impl LocalBinding {
    /// Construct the host handle for `defaults`.
    pub fn connect(runtime: &dyn HostRuntime, defaults: &ScrapeConfig) -> Result<Self> {
        let handle = runtime.construct(defaults).map_err(wrap)?;
        Ok(Self { handle })
    }
}

#[async_trait]
impl CrawlBackend for LocalBinding {
    async fn scrape(&self, url: &str, options: ScrapeConfig) -> Result<ScrapeResult> {
        self.handle.scrape(url, &options).await.map_err(wrap)
    }

    async fn map(&self, url: &str, options: MapOptions) -> Result<MapResult> {
        self.handle.map(url, &options).await.map_err(wrap)
    }

    async fn crawl(&self, url: &str, options: CrawlOptions) -> Result<CrawlResult> {
        self.handle.crawl(url, &options).await.map_err(wrap)
    }
}

fn wrap(err: HostError) -> BlessCrawlError {
    let message = err.to_string();
    log::debug!("Local binding failed: {message}");
    if message.trim().is_empty() {
        BlessCrawlError::binding(FALLBACK_MESSAGE)
    } else {
        BlessCrawlError::binding(message)
    }
}
