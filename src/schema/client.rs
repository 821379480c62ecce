//! Remote override fields of the client config.

use serde_json::{Map, Value};
use url::Url;

use super::Validator;

/// Returns `(endpoint_url, function_id)`.
pub(super) fn check(
    v: &mut Validator,
    obj: &Map<String, Value>,
) -> (Option<String>, Option<String>) {
    let endpoint_url = obj.get("endpoint_url").and_then(|x| {
        let url = v.string("endpoint_url", x, 1, usize::MAX)?;
        if Url::parse(&url).is_err() {
            v.report("endpoint_url", "must be a valid URL");
        }
        Some(url)
    });
    let function_id = obj
        .get("function_id")
        .and_then(|x| v.string("function_id", x, 1, usize::MAX));
    (endpoint_url, function_id)
}
