//! Typed success payloads for each operation.

use serde::{Deserialize, Serialize};

use super::config::{Format, LinkType};

/// Page metadata extracted during a scrape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Canonical URL of the page
    pub url: String,
    pub status_code: u16,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub robots: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,

    // Open Graph
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_audio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_video: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_determiner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_locale_alternate: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_site_name: Option<String>,

    // Twitter card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_card: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_image: Option<String>,

    // Dublin Core
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dc_terms_created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dc_date_created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dc_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dc_terms_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dc_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dc_terms_audience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dc_terms_subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dc_subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dc_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dc_terms_keywords: Option<String>,

    // Article
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_tag: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of a scrape operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub success: bool,
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    pub format: Format,
    pub content: String,
    pub metadata: PageMetadata,
}

/// A link discovered by a map operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLink {
    pub url: String,
    pub link_type: LinkType,
}

/// Result of a map operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapResult {
    pub url: String,
    pub links: Vec<MapLink>,
    pub total_links: usize,
    pub timestamp: i64,
}

impl MapResult {
    /// Links of one type, in discovery order.
    pub fn links_of(&self, link_type: LinkType) -> impl Iterator<Item = &MapLink> {
        self.links.iter().filter(move |l| l.link_type == link_type)
    }
}

/// A page that failed during a crawl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlFailure {
    pub url: String,
    pub error: String,
    pub depth: u32,
}

/// Result of a crawl operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlResult {
    pub root_url: String,
    pub pages: Vec<ScrapeResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_map: Option<MapResult>,
    pub depth_reached: u32,
    pub total_pages: usize,
    #[serde(default)]
    pub errors: Vec<CrawlFailure>,
}

impl CrawlResult {
    pub fn failed_pages(&self) -> usize {
        self.errors.len()
    }
}
