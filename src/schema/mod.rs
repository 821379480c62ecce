// src/schema/mod.rs

//! Structural validation of untrusted option objects.
//!
//! Each `validate_*` function takes an arbitrary JSON value and either
//! returns the typed configuration or a [`ValidationError`] listing every
//! violated constraint. Validation never stops at the first violation.
//!
//! Unknown fields are ignored. Omitted fields stay `None`; nothing is
//! defaulted here.

mod client;
mod crawl;
mod map;
mod scrape;

use std::borrow::Cow;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{ValidationError, Violation};
use crate::models::{
    ClientConfig, CrawlConfig, CrawlOptions, Format, LinkType, MapConfig, MapOptions, ScrapeConfig,
};

/// Validate scrape options.
pub fn validate_scrape(input: &Value) -> Result<ScrapeConfig, ValidationError> {
    let obj = root_object(input)?;
    let mut v = Validator::new();
    let config = scrape::check(&mut v, &obj);
    v.finish(config)
}

/// Validate only the map-specific fields of `input`.
pub fn validate_map_config(input: &Value) -> Result<MapConfig, ValidationError> {
    let obj = root_object(input)?;
    let mut v = Validator::new();
    let config = map::check(&mut v, &obj);
    v.finish(config)
}

/// Validate only the crawl-specific fields of `input`.
pub fn validate_crawl_config(input: &Value) -> Result<CrawlConfig, ValidationError> {
    let obj = root_object(input)?;
    let mut v = Validator::new();
    let config = crawl::check(&mut v, &obj);
    v.finish(config)
}

/// Validate combined map options.
///
/// The input is split into map fields and scrape fields, each half is
/// checked against its own schema, and the halves are kept side by side.
pub fn validate_map(input: &Value) -> Result<MapOptions, ValidationError> {
    let obj = root_object(input)?;
    let (map_half, scrape_half) = split_fields(&obj, &MapConfig::FIELDS);

    let mut v = Validator::new();
    let scrape = scrape::check(&mut v, &scrape_half);
    let map = map::check(&mut v, &map_half);
    v.finish(MapOptions { scrape, map })
}

/// Validate combined crawl options.
pub fn validate_crawl(input: &Value) -> Result<CrawlOptions, ValidationError> {
    let obj = root_object(input)?;
    let (crawl_half, scrape_half) = split_fields(&obj, &CrawlConfig::FIELDS);

    let mut v = Validator::new();
    let scrape = scrape::check(&mut v, &scrape_half);
    let crawl = crawl::check(&mut v, &crawl_half);
    v.finish(CrawlOptions { scrape, crawl })
}

/// Validate the client construction config.
pub fn validate_client(input: &Value) -> Result<ClientConfig, ValidationError> {
    let obj = root_object(input)?;
    let (client_half, scrape_half) = split_fields(&obj, &ClientConfig::FIELDS);

    let mut v = Validator::new();
    let defaults = scrape::check(&mut v, &scrape_half);
    let (endpoint_url, function_id) = client::check(&mut v, &client_half);
    v.finish(ClientConfig {
        defaults,
        endpoint_url,
        function_id,
    })
}

/// Partition `obj` into (`fields`, everything else).
pub fn split_fields(
    obj: &Map<String, Value>,
    fields: &[&str],
) -> (Map<String, Value>, Map<String, Value>) {
    obj.iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .partition(|(k, _)| fields.contains(&k.as_str()))
}

/// `null` reads as an empty object; anything else must be an object.
fn root_object(input: &Value) -> Result<Cow<'_, Map<String, Value>>, ValidationError> {
    match input {
        Value::Null => Ok(Cow::Owned(Map::new())),
        Value::Object(obj) => Ok(Cow::Borrowed(obj)),
        other => Err(ValidationError::new(vec![Violation::new(
            "",
            format!("expected object, received {}", type_name(other)),
        )])),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A closed set of string values.
pub(crate) trait Choice: Copy + 'static {
    fn all() -> &'static [Self];
    fn name(self) -> &'static str;
}

impl Choice for Format {
    fn all() -> &'static [Self] {
        &Format::ALL
    }

    fn name(self) -> &'static str {
        self.as_str()
    }
}

impl Choice for LinkType {
    fn all() -> &'static [Self] {
        &LinkType::ALL
    }

    fn name(self) -> &'static str {
        self.as_str()
    }
}

/// Violation collector.
///
/// Every check reports into the collector and returns `None` when the value
/// has the wrong type. Callers build the typed value from whatever came back
/// and hand it to [`Validator::finish`], which fails if anything was
/// reported.
pub(crate) struct Validator {
    scope: Vec<String>,
    violations: Vec<Violation>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            scope: Vec::new(),
            violations: Vec::new(),
        }
    }

    pub fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.violations.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError::new(self.violations))
        }
    }

    fn path(&self, key: &str) -> String {
        let mut parts: Vec<&str> = self.scope.iter().map(String::as_str).collect();
        if !key.is_empty() {
            parts.push(key);
        }
        parts.join(".")
    }

    pub fn report(&mut self, key: &str, message: impl Into<String>) {
        let path = self.path(key);
        self.violations.push(Violation::new(path, message));
    }

    fn mismatch(&mut self, key: &str, expected: &str, value: &Value) {
        self.report(
            key,
            format!("expected {expected}, received {}", type_name(value)),
        );
    }

    /// Run `f` with `key` pushed onto the path.
    pub fn scoped<T>(&mut self, key: &str, f: impl FnOnce(&mut Self) -> T) -> T {
        self.scope.push(key.to_string());
        let out = f(self);
        self.scope.pop();
        out
    }

    pub fn integer<T: TryFrom<i64>>(
        &mut self,
        key: &str,
        value: &Value,
        min: i64,
        max: i64,
    ) -> Option<T> {
        let Some(n) = as_integer(value) else {
            self.mismatch(key, "integer", value);
            return None;
        };
        if n < min {
            self.report(key, format!("must be at least {min}"));
        } else if n > max {
            self.report(key, format!("must be at most {max}"));
        }
        T::try_from(n).ok()
    }

    pub fn boolean(&mut self, key: &str, value: &Value) -> Option<bool> {
        match value {
            Value::Bool(b) => Some(*b),
            other => {
                self.mismatch(key, "boolean", other);
                None
            }
        }
    }

    /// A string whose length lies within `min..=max`, counted in UTF-16 code units.
    pub fn string(&mut self, key: &str, value: &Value, min: usize, max: usize) -> Option<String> {
        let Value::String(s) = value else {
            self.mismatch(key, "string", value);
            return None;
        };
        let len = s.encode_utf16().count();
        if len < min {
            self.report(key, format!("must contain at least {min} character(s)"));
        } else if len > max {
            self.report(key, format!("must contain at most {max} character(s)"));
        }
        Some(s.clone())
    }

    pub fn pattern(&mut self, key: &str, value: &Value, re: &Regex) -> Option<String> {
        let Value::String(s) = value else {
            self.mismatch(key, "string", value);
            return None;
        };
        if !re.is_match(s) {
            self.report(key, format!("must match {}", re.as_str()));
        }
        Some(s.clone())
    }

    pub fn choice<T: Choice>(&mut self, key: &str, value: &Value) -> Option<T> {
        let Value::String(s) = value else {
            self.mismatch(key, "string", value);
            return None;
        };
        let found = T::all().iter().copied().find(|c| c.name() == s);
        if found.is_none() {
            let expected = T::all()
                .iter()
                .map(|c| c.name())
                .collect::<Vec<_>>()
                .join(", ");
            self.report(
                key,
                format!("invalid value '{s}', expected one of: {expected}"),
            );
        }
        found
    }

    pub fn object<'a>(&mut self, key: &str, value: &'a Value) -> Option<&'a Map<String, Value>> {
        match value {
            Value::Object(obj) => Some(obj),
            other => {
                self.mismatch(key, "object", other);
                None
            }
        }
    }

    /// An array of at most `max_items` elements, each checked by `item`.
    pub fn list<T>(
        &mut self,
        key: &str,
        value: &Value,
        max_items: usize,
        mut item: impl FnMut(&mut Self, &str, &Value) -> Option<T>,
    ) -> Option<Vec<T>> {
        let Value::Array(items) = value else {
            self.mismatch(key, "array", value);
            return None;
        };
        if items.len() > max_items {
            self.report(key, format!("must contain at most {max_items} item(s)"));
        }
        let out: Vec<T> = self.scoped(key, |v| {
            items
                .iter()
                .enumerate()
                .filter_map(|(i, element)| item(v, &i.to_string(), element))
                .collect()
        });
        Some(out)
    }
}

/// JSON integers, or floats without a fractional part.
///
/// Values outside the `i64` range saturate, so bound checks still apply.
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i64)
            }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_scrape() -> Value {
        json!({
            "timeout": 20000,
            "wait_time": 0,
            "include_tags": ["article", "main-content"],
            "exclude_tags": ["nav"],
            "only_main_content": true,
            "format": "markdown",
            "viewport": {"width": 1280, "height": 720},
            "user_agent": "bless-crawl/1.0",
            "headers": {"X-Trace_Id": "abc", "Accept": "text/html"}
        })
    }

    fn valid_map() -> Value {
        json!({
            "link_types": ["internal", "external", "file"],
            "base_url": "https://example.com",
            "filter_extensions": [".pdf", ".tar"]
        })
    }

    fn valid_crawl() -> Value {
        json!({
            "limit": 100,
            "max_depth": 3,
            "exclude_paths": ["/admin"],
            "include_paths": ["/blog"],
            "follow_external": false,
            "delay_between_requests": 500,
            "parallel_requests": 5
        })
    }

    fn merge(a: &Value, b: &Value) -> Value {
        let mut out = a.as_object().cloned().unwrap_or_default();
        out.extend(b.as_object().cloned().unwrap_or_default());
        Value::Object(out)
    }

    #[test]
    fn test_valid_scrape_keeps_values() {
        let input = valid_scrape();
        let config = validate_scrape(&input).unwrap();
        assert_eq!(serde_json::to_value(&config).unwrap(), input);
    }

    #[test]
    fn test_empty_and_null_inputs_are_valid() {
        assert_eq!(validate_scrape(&json!({})).unwrap(), ScrapeConfig::default());
        assert_eq!(validate_scrape(&Value::Null).unwrap(), ScrapeConfig::default());
        assert_eq!(validate_crawl(&Value::Null).unwrap(), CrawlOptions::default());
    }

    #[test]
    fn test_non_object_root() {
        let err = validate_scrape(&json!("fast")).unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.to_string(), "expected object, received string");
    }

    #[test]
    fn test_timeout_bounds() {
        for bad in [4999, 120001] {
            let err = validate_scrape(&json!({ "timeout": bad })).unwrap_err();
            assert!(err.mentions("timeout"), "{err}");
        }
        for good in [5000, 120000] {
            assert!(validate_scrape(&json!({ "timeout": good })).is_ok());
        }
    }

    #[test]
    fn test_each_out_of_bound_field_is_named() {
        let cases = [
            (json!({"wait_time": 20001}), "wait_time"),
            (json!({"wait_time": -1}), "wait_time"),
            (json!({"viewport": {"width": 319}}), "viewport.width"),
            (json!({"viewport": {"height": 4321}}), "viewport.height"),
            (json!({"user_agent": ""}), "user_agent"),
            (json!({"user_agent": "a".repeat(501)}), "user_agent"),
            (json!({"format": "xml"}), "format"),
            (json!({"only_main_content": "yes"}), "only_main_content"),
            (json!({"include_tags": ["1div"]}), "include_tags.0"),
            (json!({"exclude_tags": ["ok", "no space"]}), "exclude_tags.1"),
            (json!({"headers": {"1bad": "x"}}), "headers.1bad"),
            (json!({"headers": {"X-Long": "v".repeat(1001)}}), "headers.X-Long"),
            (json!({"headers": {"X-Num": 5}}), "headers.X-Num"),
            (json!({"timeout": null}), "timeout"),
            (json!({"timeout": 6000.5}), "timeout"),
        ];
        for (input, path) in cases {
            let err = validate_scrape(&input).unwrap_err();
            assert!(err.mentions(path), "expected {path} in: {err}");
        }
    }

    #[test]
    fn test_cardinality_limits() {
        let tags: Vec<String> = (0..51).map(|i| format!("t{i}")).collect();
        let err = validate_scrape(&json!({ "include_tags": tags })).unwrap_err();
        assert!(err.mentions("include_tags"));

        let headers: Map<String, Value> = (0..21)
            .map(|i| (format!("X-H{i}"), json!("v")))
            .collect();
        let err = validate_scrape(&json!({ "headers": headers })).unwrap_err();
        assert!(err.mentions("headers"));

        let types = vec!["internal"; 11];
        let err = validate_map(&json!({ "link_types": types })).unwrap_err();
        assert!(err.mentions("link_types"));

        let exts = vec![".a"; 21];
        let err = validate_map(&json!({ "filter_extensions": exts })).unwrap_err();
        assert!(err.mentions("filter_extensions"));

        let paths = vec!["/x"; 101];
        let err = validate_crawl(&json!({ "include_paths": paths })).unwrap_err();
        assert!(err.mentions("include_paths"));
    }

    #[test]
    fn test_collects_all_violations() {
        let err = validate_crawl(&json!({
            "timeout": 1,
            "format": "pdf",
            "max_depth": 6,
            "parallel_requests": 0
        }))
        .unwrap_err();

        assert_eq!(err.violations().len(), 4);
        for path in ["timeout", "format", "max_depth", "parallel_requests"] {
            assert!(err.mentions(path), "missing {path}: {err}");
        }
    }

    #[test]
    fn test_float_with_zero_fraction_is_integer() {
        let config = validate_scrape(&json!({ "timeout": 20000.0 })).unwrap();
        assert_eq!(config.timeout, Some(20000));
    }

    #[test]
    fn test_huge_integers_report_bounds() {
        let err = validate_crawl(&json!({ "limit": u64::MAX, "delay_between_requests": -1e20 }))
            .unwrap_err();
        let messages: Vec<String> = err.violations().iter().map(|v| v.to_string()).collect();
        assert!(messages.contains(&"limit: must be at most 1000".to_string()), "{err}");
        assert!(
            messages.contains(&"delay_between_requests: must be at least 0".to_string()),
            "{err}"
        );
    }

    #[test]
    fn test_string_length_counts_utf16_units() {
        // each emoji is a surrogate pair
        let long = "\u{1F600}".repeat(300);
        let err = validate_scrape(&json!({ "user_agent": long })).unwrap_err();
        assert!(err.mentions("user_agent"), "{err}");

        let fits = "\u{1F600}".repeat(250);
        assert!(validate_scrape(&json!({ "user_agent": fits })).is_ok());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let config = validate_scrape(&json!({ "format": "html", "screenshot": true })).unwrap();
        assert_eq!(config.format, Some(Format::Html));
    }

    #[test]
    fn test_map_split_is_lossless() {
        let scrape = valid_scrape();
        let map = valid_map();
        let combined = validate_map(&merge(&scrape, &map)).unwrap();

        let separate = MapOptions {
            scrape: validate_scrape(&scrape).unwrap(),
            map: validate_map_config(&map).unwrap(),
        };
        assert_eq!(combined, separate);
        assert_eq!(
            serde_json::to_value(&combined).unwrap(),
            merge(&scrape, &map)
        );
    }

    #[test]
    fn test_crawl_split_is_lossless() {
        let scrape = valid_scrape();
        let crawl = valid_crawl();
        let combined = validate_crawl(&merge(&scrape, &crawl)).unwrap();

        let separate = CrawlOptions {
            scrape: validate_scrape(&scrape).unwrap(),
            crawl: validate_crawl_config(&crawl).unwrap(),
        };
        assert_eq!(combined, separate);
        assert_eq!(
            serde_json::to_value(&combined).unwrap(),
            merge(&scrape, &crawl)
        );
    }

    #[test]
    fn test_crawl_bounds() {
        let cases = [
            (json!({"limit": 0}), "limit"),
            (json!({"limit": 1001}), "limit"),
            (json!({"max_depth": 6}), "max_depth"),
            (json!({"max_depth": 0}), "max_depth"),
            (json!({"exclude_paths": [""]}), "exclude_paths.0"),
            (json!({"include_paths": ["x".repeat(201)]}), "include_paths.0"),
            (json!({"follow_external": 1}), "follow_external"),
            (json!({"delay_between_requests": 30001}), "delay_between_requests"),
            (json!({"parallel_requests": 6}), "parallel_requests"),
        ];
        for (input, path) in cases {
            let err = validate_crawl(&input).unwrap_err();
            assert!(err.mentions(path), "expected {path} in: {err}");
        }
    }

    #[test]
    fn test_map_bounds() {
        let cases = [
            (json!({"link_types": ["internal", "ftp"]}), "link_types.1"),
            (json!({"base_url": 42}), "base_url"),
            (json!({"filter_extensions": ["pdf"]}), "filter_extensions.0"),
            (json!({"filter_extensions": [".abcdefghijk"]}), "filter_extensions.0"),
        ];
        for (input, path) in cases {
            let err = validate_map(&input).unwrap_err();
            assert!(err.mentions(path), "expected {path} in: {err}");
        }
    }

    #[test]
    fn test_client_config() {
        let config = validate_client(&json!({
            "format": "json",
            "endpoint_url": "https://executor.example.com/api/v1/functions/execute",
            "function_id": "bafy-crawl"
        }))
        .unwrap();
        assert_eq!(config.defaults.format, Some(Format::Json));
        assert_eq!(config.function_id.as_deref(), Some("bafy-crawl"));

        let err = validate_client(&json!({
            "endpoint_url": "not a url",
            "function_id": "",
            "timeout": 1
        }))
        .unwrap_err();
        for path in ["endpoint_url", "function_id", "timeout"] {
            assert!(err.mentions(path), "missing {path}: {err}");
        }
    }
}
