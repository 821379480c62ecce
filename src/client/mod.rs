// src/client/mod.rs

//! Dual-mode client.
//!
//! [`BlessCrawl`] exposes `scrape`, `map` and `crawl` with the same signature
//! in both modes. The mode is picked once at construction by asking a
//! [`HostProbe`] for a host runtime:
//!
//! - host runtime found: calls go to a [`LocalBinding`]
//! - none found: calls go to a [`RemoteClient`]
//!
//! Every call checks the URL, validates its own options, then dispatches.

mod backend;
mod local;
mod remote;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{BlessCrawlError, Result};
use crate::models::{ClientConfig, CrawlResult, MapResult, ScrapeResult};
use crate::schema;
use crate::settings;
use crate::utils::require_url;

pub use backend::CrawlBackend;
pub use local::{FALLBACK_MESSAGE, HostBinding, HostError, HostRuntime, LocalBinding};
pub use remote::RemoteClient;

/// Capability detection, run once per client construction.
pub type HostProbe = Arc<dyn Fn() -> Option<Arc<dyn HostRuntime>> + Send + Sync>;

const EMPTY_URL: &str = "URL is required and must be a non-empty string";

/// Dispatch mode of a client instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Local,
    Remote,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Local => f.write_str("local"),
            Mode::Remote => f.write_str("remote"),
        }
    }
}

/// Probe that never finds a host runtime.
pub fn no_host() -> Option<Arc<dyn HostRuntime>> {
    None
}

/// Client for scrape, map and crawl operations.
pub struct BlessCrawl {
    mode: Mode,
    config: ClientConfig,
    backend: Arc<dyn CrawlBackend>,
}

impl BlessCrawl {
    /// Build a client with the default probe (remote mode).
    pub fn new(config: Value) -> Result<Self> {
        Self::builder().config(config).build()
    }

    pub fn builder() -> BlessCrawlBuilder {
        BlessCrawlBuilder::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The validated construction config.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Scrape a single page.
    pub async fn scrape(&self, url: &str, options: Value) -> Result<ScrapeResult> {
        let url = guard(url)?;
        let options = schema::validate_scrape(&options)?;
        log::debug!("scrape {url} via {} mode", self.mode);
        self.backend.scrape(url, options).await
    }

    /// Collect the links reachable from a page.
    pub async fn map(&self, url: &str, options: Value) -> Result<MapResult> {
        let url = guard(url)?;
        let options = schema::validate_map(&options)?;
        log::debug!("map {url} via {} mode", self.mode);
        self.backend.map(url, options).await
    }

    /// Crawl a site starting at `url`.
    pub async fn crawl(&self, url: &str, options: Value) -> Result<CrawlResult> {
        let url = guard(url)?;
        let options = schema::validate_crawl(&options)?;
        log::debug!("crawl {url} via {} mode", self.mode);
        self.backend.crawl(url, options).await
    }
}

impl fmt::Debug for BlessCrawl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlessCrawl")
            .field("mode", &self.mode)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn guard(url: &str) -> Result<&str> {
    require_url(url).ok_or_else(|| BlessCrawlError::invalid_input(EMPTY_URL))
}

/// Builder for [`BlessCrawl`].
pub struct BlessCrawlBuilder {
    config: Value,
    probe: HostProbe,
}

impl Default for BlessCrawlBuilder {
    fn default() -> Self {
        Self {
            config: Value::Null,
            probe: Arc::new(no_host),
        }
    }
}

impl BlessCrawlBuilder {
    /// Untyped client config, validated in [`build`](Self::build).
    pub fn config(mut self, config: Value) -> Self {
        self.config = config;
        self
    }

    /// Replace the capability probe.
    pub fn probe<F>(mut self, probe: F) -> Self
    where
        F: Fn() -> Option<Arc<dyn HostRuntime>> + Send + Sync + 'static,
    {
        self.probe = Arc::new(probe);
        self
    }

    /// Always use `runtime`.
    pub fn host(self, runtime: Arc<dyn HostRuntime>) -> Self {
        self.probe(move || Some(Arc::clone(&runtime)))
    }

    pub fn build(self) -> Result<BlessCrawl> {
        let config = schema::validate_client(&self.config)?;

        let (mode, backend): (Mode, Arc<dyn CrawlBackend>) = match (self.probe)() {
            Some(runtime) => {
                let local = LocalBinding::connect(runtime.as_ref(), &config.defaults)?;
                (Mode::Local, Arc::new(local))
            }
            None => {
                let remote = RemoteClient::new(
                    settings::resolve_endpoint(config.endpoint_url.as_deref()),
                    settings::resolve_function_id(config.function_id.as_deref()),
                    config.defaults.clone(),
                );
                log::debug!(
                    "Remote endpoint {} (function {})",
                    remote.endpoint_url(),
                    remote.function_id()
                );
                (Mode::Remote, Arc::new(remote))
            }
        };

        log::info!("BlessCrawl client ready in {mode} mode");
        Ok(BlessCrawl {
            mode,
            config,
            backend,
        })
    }
}
