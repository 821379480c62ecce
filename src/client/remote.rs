// src/client/remote.rs

//! Remote mode: run operations through the execution endpoint.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::backend::CrawlBackend;
use crate::error::{BlessCrawlError, ErrorCode, Result};
use crate::models::{
    CrawlOptions, CrawlResult, MapOptions, MapResult, Operation, ScrapeConfig, ScrapeResult,
};
use crate::protocol::{ExecuteRequest, OperationRequest, decode_response};
use crate::utils::http;

/// Backend that POSTs each call to the remote endpoint.
///
/// Holds no connection state: every call builds its own HTTP client and
/// issues a single request.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    endpoint_url: String,
    function_id: String,
    defaults: ScrapeConfig,
}

impl RemoteClient {
    pub fn new(
        endpoint_url: impl Into<String>,
        function_id: impl Into<String>,
        defaults: ScrapeConfig,
    ) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            function_id: function_id.into(),
            defaults,
        }
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    pub fn function_id(&self) -> &str {
        &self.function_id
    }

    /// Send one operation and return its raw `data`.
    pub async fn execute<C: Serialize + Sync>(
        &self,
        operation: Operation,
        url: &str,
        config: &C,
    ) -> Result<Value> {
        let config = serde_json::to_value(config).map_err(|e| encode_error(&e))?;
        let request = OperationRequest::new(operation, url, config);
        let body = ExecuteRequest::new(&self.function_id, &request).map_err(|e| encode_error(&e))?;

        log::debug!(
            "POST {} (function {}) for {} {}",
            self.endpoint_url,
            self.function_id,
            operation,
            url
        );

        let response = http::post_json(&self.endpoint_url, &body).await?;
        decode_response(response).await.inspect_err(|e| {
            log::warn!(
                "{} {} failed [{}]: {}",
                operation,
                url,
                e.code().map_or_else(String::new, |c| c.to_string()),
                e
            );
        })
    }

    async fn run<C: Serialize + Sync, T: DeserializeOwned>(
        &self,
        operation: Operation,
        url: &str,
        config: &C,
    ) -> Result<T> {
        let data = self.execute(operation, url, config).await?;
        typed(data)
    }
}

#[async_trait]
impl CrawlBackend for RemoteClient {
    async fn scrape(&self, url: &str, options: ScrapeConfig) -> Result<ScrapeResult> {
        let config = self.defaults.overlay(&options);
        self.run(Operation::Scrape, url, &config).await
    }

    async fn map(&self, url: &str, options: MapOptions) -> Result<MapResult> {
        let config = options.with_defaults(&self.defaults);
        self.run(Operation::Map, url, &config).await
    }

    async fn crawl(&self, url: &str, options: CrawlOptions) -> Result<CrawlResult> {
        let config = options.with_defaults(&self.defaults);
        self.run(Operation::Crawl, url, &config).await
    }
}

/// Convert operation data into the requested result type.
fn typed<T: DeserializeOwned>(data: Value) -> Result<T> {
    <T as serde::Deserialize>::deserialize(&data).map_err(|e| {
        BlessCrawlError::protocol(
            ErrorCode::ResultFormat,
            format!("Operation data does not match the expected result: {e}"),
            Some(data.clone()),
        )
    })
}

fn encode_error(e: &serde_json::Error) -> BlessCrawlError {
    BlessCrawlError::Transport {
        message: format!("HTTP error: failed to encode request: {e}"),
        status: None,
        source: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typed_shape_mismatch() {
        let err = typed::<ScrapeResult>(json!({"links": []})).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::ResultFormat));
        assert_eq!(err.cause(), Some(&json!({"links": []})));
    }

    #[test]
    fn test_typed_map_result() {
        let result: MapResult = typed(json!({
            "url": "https://example.com",
            "links": [{"url": "https://example.com/a", "link_type": "internal"}],
            "total_links": 1,
            "timestamp": 10
        }))
        .unwrap();
        assert_eq!(result.total_links, 1);
    }
}
