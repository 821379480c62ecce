//! Map option schema.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::Validator;
use crate::models::MapConfig;

static EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.[A-Za-z0-9]{1,10}$").expect("valid extension pattern"));

pub(super) fn check(v: &mut Validator, obj: &Map<String, Value>) -> MapConfig {
    MapConfig {
        link_types: obj
            .get("link_types")
            .and_then(|x| v.list("link_types", x, 10, |v, i, item| v.choice(i, item))),
        base_url: obj
            .get("base_url")
            .and_then(|x| v.string("base_url", x, 0, usize::MAX)),
        filter_extensions: obj.get("filter_extensions").and_then(|x| {
            v.list("filter_extensions", x, 20, |v, i, item| {
                v.pattern(i, item, &EXTENSION)
            })
        }),
    }
}
