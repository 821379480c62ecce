//! Scrape option schema.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::Validator;
use crate::models::{ScrapeConfig, Viewport};

static TAG_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9\-]*$").expect("valid tag pattern"));

static HEADER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9\-_]*$").expect("valid header pattern"));

const MAX_TAGS: usize = 50;
const MAX_HEADERS: usize = 20;
const MAX_HEADER_VALUE: usize = 1000;

pub(super) fn check(v: &mut Validator, obj: &Map<String, Value>) -> ScrapeConfig {
    ScrapeConfig {
        timeout: obj
            .get("timeout")
            .and_then(|x| v.integer("timeout", x, 5_000, 120_000)),
        wait_time: obj
            .get("wait_time")
            .and_then(|x| v.integer("wait_time", x, 0, 20_000)),
        include_tags: obj
            .get("include_tags")
            .and_then(|x| tags(v, "include_tags", x)),
        exclude_tags: obj
            .get("exclude_tags")
            .and_then(|x| tags(v, "exclude_tags", x)),
        only_main_content: obj
            .get("only_main_content")
            .and_then(|x| v.boolean("only_main_content", x)),
        format: obj.get("format").and_then(|x| v.choice("format", x)),
        viewport: obj.get("viewport").and_then(|x| viewport(v, x)),
        user_agent: obj
            .get("user_agent")
            .and_then(|x| v.string("user_agent", x, 1, 500)),
        headers: obj.get("headers").and_then(|x| headers(v, x)),
    }
}

fn tags(v: &mut Validator, key: &str, value: &Value) -> Option<Vec<String>> {
    v.list(key, value, MAX_TAGS, |v, i, item| v.pattern(i, item, &TAG_NAME))
}

fn viewport(v: &mut Validator, value: &Value) -> Option<Viewport> {
    let obj = v.object("viewport", value)?;
    let viewport = v.scoped("viewport", |v| Viewport {
        width: obj
            .get("width")
            .and_then(|x| v.integer("width", x, 320, 7_680)),
        height: obj
            .get("height")
            .and_then(|x| v.integer("height", x, 240, 4_320)),
    });
    Some(viewport)
}

fn headers(v: &mut Validator, value: &Value) -> Option<BTreeMap<String, String>> {
    let obj = v.object("headers", value)?;
    if obj.len() > MAX_HEADERS {
        v.report("headers", format!("must contain at most {MAX_HEADERS} entries"));
    }
    let headers = v.scoped("headers", |v| {
        let mut out = BTreeMap::new();
        for (name, raw) in obj {
            if !HEADER_NAME.is_match(name) {
                v.report(name, format!("header name must match {}", HEADER_NAME.as_str()));
                continue;
            }
            if let Some(text) = v.string(name, raw, 0, MAX_HEADER_VALUE) {
                out.insert(name.clone(), text);
            }
        }
        out
    });
    Some(headers)
}
