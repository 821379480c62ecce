//! Combined per-call options for map and crawl.
//!
//! A map or crawl call accepts one flat options object. The validated form
//! keeps the two halves apart and flattens them back together when sent.

use serde::{Deserialize, Serialize};

use super::config::{CrawlConfig, MapConfig, ScrapeConfig};

/// Validated options for a map call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapOptions {
    #[serde(flatten)]
    pub scrape: ScrapeConfig,
    #[serde(flatten)]
    pub map: MapConfig,
}

/// Validated options for a crawl call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlOptions {
    #[serde(flatten)]
    pub scrape: ScrapeConfig,
    #[serde(flatten)]
    pub crawl: CrawlConfig,
}

impl MapOptions {
    /// Apply client defaults under the scrape half.
    pub fn with_defaults(&self, defaults: &ScrapeConfig) -> MapOptions {
        MapOptions {
            scrape: defaults.overlay(&self.scrape),
            map: self.map.clone(),
        }
    }
}

impl CrawlOptions {
    /// Apply client defaults under the scrape half.
    pub fn with_defaults(&self, defaults: &ScrapeConfig) -> CrawlOptions {
        CrawlOptions {
            scrape: defaults.overlay(&self.scrape),
            crawl: self.crawl.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Format, LinkType};
    use serde_json::json;

    #[test]
    fn test_map_options_flatten() {
        let options = MapOptions {
            scrape: ScrapeConfig {
                format: Some(Format::Html),
                ..ScrapeConfig::default()
            },
            map: MapConfig {
                link_types: Some(vec![LinkType::Internal, LinkType::Mailto]),
                ..MapConfig::default()
            },
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"format": "html", "link_types": ["internal", "mailto"]})
        );
    }

    #[test]
    fn test_crawl_defaults_do_not_touch_crawl_half() {
        let defaults = ScrapeConfig {
            timeout: Some(60000),
            ..ScrapeConfig::default()
        };
        let options = CrawlOptions {
            scrape: ScrapeConfig::default(),
            crawl: CrawlConfig {
                max_depth: Some(2),
                ..CrawlConfig::default()
            },
        };

        let merged = options.with_defaults(&defaults);
        assert_eq!(merged.scrape.timeout, Some(60000));
        assert_eq!(merged.crawl, options.crawl);
    }
}
