//! Supported web operations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three web-extraction actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Scrape,
    Map,
    Crawl,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Scrape => "scrape",
            Operation::Map => "map",
            Operation::Crawl => "crawl",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
