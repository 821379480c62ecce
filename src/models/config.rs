//! Operation configuration structures.
//!
//! These are the validated forms of the option objects accepted by the
//! client. Values are built by the [`crate::schema`] validators; every field
//! is optional and absent fields are omitted when serialized.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Output format of a scraped page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Markdown,
    Html,
    Json,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Markdown, Format::Html, Format::Json];

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Markdown => "markdown",
            Format::Html => "html",
            Format::Json => "json",
        }
    }
}

/// Classification of a discovered link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Internal,
    External,
    Anchor,
    Mailto,
    Tel,
    File,
}

impl LinkType {
    pub const ALL: [LinkType; 6] = [
        LinkType::Internal,
        LinkType::External,
        LinkType::Anchor,
        LinkType::Mailto,
        LinkType::Tel,
        LinkType::File,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::Internal => "internal",
            LinkType::External => "external",
            LinkType::Anchor => "anchor",
            LinkType::Mailto => "mailto",
            LinkType::Tel => "tel",
            LinkType::File => "file",
        }
    }
}

/// Browser viewport dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Options shared by every operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Page load timeout in milliseconds, forwarded to the executor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,

    /// Extra wait after load in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_time: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_tags: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_tags: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_main_content: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
}

impl ScrapeConfig {
    /// Layer `call` over `self`: fields set in `call` win, the rest fall back
    /// to `self`. Nested values (viewport, headers) are replaced whole.
    pub fn overlay(&self, call: &ScrapeConfig) -> ScrapeConfig {
        ScrapeConfig {
            timeout: call.timeout.or(self.timeout),
            wait_time: call.wait_time.or(self.wait_time),
            include_tags: call
                .include_tags
                .clone()
                .or_else(|| self.include_tags.clone()),
            exclude_tags: call
                .exclude_tags
                .clone()
                .or_else(|| self.exclude_tags.clone()),
            only_main_content: call.only_main_content.or(self.only_main_content),
            format: call.format.or(self.format),
            viewport: call.viewport.or(self.viewport),
            user_agent: call.user_agent.clone().or_else(|| self.user_agent.clone()),
            headers: call.headers.clone().or_else(|| self.headers.clone()),
        }
    }
}

/// Map-specific options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_types: Option<Vec<LinkType>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Extensions such as `.pdf` to filter out of the link map
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_extensions: Option<Vec<String>>,
}

impl MapConfig {
    pub const FIELDS: [&'static str; 3] = ["link_types", "base_url", "filter_extensions"];
}

/// Crawl-specific options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_paths: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_paths: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_external: Option<bool>,

    /// Delay between page requests in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_between_requests: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel_requests: Option<u32>,
}

impl CrawlConfig {
    pub const FIELDS: [&'static str; 7] = [
        "limit",
        "max_depth",
        "exclude_paths",
        "include_paths",
        "follow_external",
        "delay_between_requests",
        "parallel_requests",
    ];
}

/// Client construction config: scrape defaults plus remote overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(flatten)]
    pub defaults: ScrapeConfig,

    /// Remote execution endpoint (remote mode only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,

    /// Function to execute on the remote endpoint (remote mode only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_id: Option<String>,
}

impl ClientConfig {
    pub const FIELDS: [&'static str; 2] = ["endpoint_url", "function_id"];
}
