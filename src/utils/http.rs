// src/utils/http.rs

//! HTTP client utilities.

use reqwest::Client;
use serde::Serialize;

use crate::error::{BlessCrawlError, Result};

const USER_AGENT: &str = concat!("bless-crawl/", env!("CARGO_PKG_VERSION"));

/// Create a fresh asynchronous HTTP client.
///
/// No timeout is set; the call's `timeout` option is forwarded to the
/// executor instead of being enforced here.
pub fn create_async_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(BlessCrawlError::transport)
}

/// POST `body` as JSON on a one-off client.
pub async fn post_json<T: Serialize + ?Sized>(url: &str, body: &T) -> Result<reqwest::Response> {
    let client = create_async_client()?;
    client
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(BlessCrawlError::transport)
}
