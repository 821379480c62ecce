//! Crawl option schema.

use serde_json::{Map, Value};

use super::Validator;
use crate::models::CrawlConfig;

const MAX_PATHS: usize = 100;

pub(super) fn check(v: &mut Validator, obj: &Map<String, Value>) -> CrawlConfig {
    CrawlConfig {
        limit: obj
            .get("limit")
            .and_then(|x| v.integer("limit", x, 1, 1_000)),
        max_depth: obj
            .get("max_depth")
            .and_then(|x| v.integer("max_depth", x, 1, 5)),
        exclude_paths: obj
            .get("exclude_paths")
            .and_then(|x| paths(v, "exclude_paths", x)),
        include_paths: obj
            .get("include_paths")
            .and_then(|x| paths(v, "include_paths", x)),
        follow_external: obj
            .get("follow_external")
            .and_then(|x| v.boolean("follow_external", x)),
        delay_between_requests: obj
            .get("delay_between_requests")
            .and_then(|x| v.integer("delay_between_requests", x, 0, 30_000)),
        parallel_requests: obj
            .get("parallel_requests")
            .and_then(|x| v.integer("parallel_requests", x, 1, 5)),
    }
}

fn paths(v: &mut Validator, key: &str, value: &Value) -> Option<Vec<String>> {
    v.list(key, value, MAX_PATHS, |v, i, item| v.string(i, item, 1, 200))
}
