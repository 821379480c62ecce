//! Request envelope for the remote execution endpoint.
//!
//! The operation request travels JSON-encoded inside the `stdin` field of an
//! outer execute request:
//!
//! ```text
//! {
//!   "function_id": "...",
//!   "method": "blessnet.wasm",
//!   "config": {
//!     "permissions": ["<url>"],
//!     "stdin": "{\"operation\":\"scrape\",\"url\":\"<url>\",\"config\":{...}}"
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::Operation;

/// Execution method selector understood by the endpoint.
pub const METHOD: &str = "blessnet.wasm";

/// Inner document carried in `stdin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRequest {
    pub operation: Operation,
    pub url: String,
    pub config: Value,
}

impl OperationRequest {
    pub fn new(operation: Operation, url: impl Into<String>, config: Value) -> Self {
        Self {
            operation,
            url: url.into(),
            config,
        }
    }

    /// Encode as the `stdin` string.
    pub fn to_stdin(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decode from a `stdin` string.
    pub fn from_stdin(stdin: &str) -> serde_json::Result<Self> {
        serde_json::from_str(stdin)
    }
}

/// Outer request body POSTed to the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecuteRequest {
    pub function_id: String,
    pub method: String,
    pub config: ExecuteConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecuteConfig {
    pub permissions: Vec<String>,
    pub stdin: String,
}

impl ExecuteRequest {
    /// Wrap `request` for `function_id`, granting access to the target URL.
    pub fn new(function_id: &str, request: &OperationRequest) -> serde_json::Result<Self> {
        Ok(Self {
            function_id: function_id.to_string(),
            method: METHOD.to_string(),
            config: ExecuteConfig {
                permissions: vec![request.url.clone()],
                stdin: request.to_stdin()?,
            },
        })
    }
}
