// src/error.rs

//! Unified error handling for the client.
//!
//! Every failure past the call boundary is a [`BlessCrawlError`]. Remote
//! failures carry a machine-readable [`ErrorCode`] and, where useful, the raw
//! payload that caused them; local binding failures and the URL guard carry
//! only a message.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, BlessCrawlError>;

/// Machine-readable error codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Validation,
    Http,
    ResponseFormat,
    FunctionExecution,
    NoResults,
    ResultFormat,
    FunctionExit,
    StdoutFormat,
    StdoutParse,
    StdinOutputFormat,
    Operation,
    NoData,
    /// A code reported by the remote operation itself.
    Remote(String),
}

impl ErrorCode {
    /// Wire representation of the code.
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::Validation => "VALIDATION_ERROR",
            ErrorCode::Http => "HTTP_ERROR",
            ErrorCode::ResponseFormat => "RESPONSE_FORMAT_ERROR",
            ErrorCode::FunctionExecution => "FUNCTION_EXECUTION_ERROR",
            ErrorCode::NoResults => "NO_RESULTS_ERROR",
            ErrorCode::ResultFormat => "RESULT_FORMAT_ERROR",
            ErrorCode::FunctionExit => "FUNCTION_EXIT_ERROR",
            ErrorCode::StdoutFormat => "STDOUT_FORMAT_ERROR",
            ErrorCode::StdoutParse => "STDOUT_PARSE_ERROR",
            ErrorCode::StdinOutputFormat => "STDIN_OUTPUT_FORMAT_ERROR",
            ErrorCode::Operation => "OPERATION_ERROR",
            ErrorCode::NoData => "NO_DATA_ERROR",
            ErrorCode::Remote(code) => code,
        }
    }

    /// Parse a code string, keeping unknown codes verbatim.
    pub fn parse(code: &str) -> Self {
        match code {
            "VALIDATION_ERROR" => ErrorCode::Validation,
            "HTTP_ERROR" => ErrorCode::Http,
            "RESPONSE_FORMAT_ERROR" => ErrorCode::ResponseFormat,
            "FUNCTION_EXECUTION_ERROR" => ErrorCode::FunctionExecution,
            "NO_RESULTS_ERROR" => ErrorCode::NoResults,
            "RESULT_FORMAT_ERROR" => ErrorCode::ResultFormat,
            "FUNCTION_EXIT_ERROR" => ErrorCode::FunctionExit,
            "STDOUT_FORMAT_ERROR" => ErrorCode::StdoutFormat,
            "STDOUT_PARSE_ERROR" => ErrorCode::StdoutParse,
            "STDIN_OUTPUT_FORMAT_ERROR" => ErrorCode::StdinOutputFormat,
            "OPERATION_ERROR" => ErrorCode::Operation,
            "NO_DATA_ERROR" => ErrorCode::NoData,
            other => ErrorCode::Remote(other.to_string()),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single violated constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dot-separated path to the offending field (empty for the root)
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Input failed schema validation. Holds every violation found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Whether any violation points at `path`.
    pub fn mentions(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl std::error::Error for ValidationError {}

/// Error taxonomy, for callers that branch on the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input shape or range violation
    Validation,
    /// Pre-validation guard (empty URL)
    InvalidInput,
    /// Network or HTTP failure
    Transport,
    /// Malformed or semantically invalid remote envelope
    Protocol,
    /// The remote function ran but exited non-zero
    Execution,
    /// The web operation itself reported failure
    Operation,
    /// The local host binding failed
    Binding,
}

/// Unified client error type.
#[derive(Error, Debug)]
pub enum BlessCrawlError {
    /// Schema validation failed
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Call arguments rejected before validation
    #[error("{0}")]
    InvalidInput(String),

    /// HTTP request failed or returned a non-success status
    #[error("{message}")]
    Transport {
        message: String,
        status: Option<u16>,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Remote reply did not have the expected structure
    #[error("{message}")]
    Protocol {
        code: ErrorCode,
        message: String,
        cause: Option<Value>,
    },

    /// Remote function exited with a non-zero code
    #[error("{message}")]
    Execution {
        exit_code: Option<i64>,
        message: String,
        cause: Value,
    },

    /// Remote operation reported failure
    #[error("{message}")]
    Operation {
        code: ErrorCode,
        message: String,
        cause: Option<Value>,
    },

    /// Local host binding failed
    #[error("{0}")]
    Binding(String),
}

impl BlessCrawlError {
    /// Create an input guard error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a transport error from a failed request.
    pub fn transport(source: reqwest::Error) -> Self {
        Self::Transport {
            message: format!("HTTP error: {source}"),
            status: source.status().map(|s| s.as_u16()),
            source: Some(source),
        }
    }

    /// Create a transport error for a non-success status.
    pub fn http_status(status: u16, reason: &str) -> Self {
        Self::Transport {
            message: format!("HTTP error: {status} {reason}"),
            status: Some(status),
            source: None,
        }
    }

    /// Create a protocol error.
    pub fn protocol(code: ErrorCode, message: impl Into<String>, cause: Option<Value>) -> Self {
        Self::Protocol {
            code,
            message: message.into(),
            cause,
        }
    }

    /// Create a binding error.
    pub fn binding(message: impl Into<String>) -> Self {
        Self::Binding(message.into())
    }

    /// Failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Protocol { .. } => ErrorKind::Protocol,
            Self::Execution { .. } => ErrorKind::Execution,
            Self::Operation { .. } => ErrorKind::Operation,
            Self::Binding(_) => ErrorKind::Binding,
        }
    }

    /// Machine-readable code. `None` for binding and input guard errors.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Validation(_) => Some(ErrorCode::Validation),
            Self::Transport { .. } => Some(ErrorCode::Http),
            Self::Protocol { code, .. } | Self::Operation { code, .. } => Some(code.clone()),
            Self::Execution { .. } => Some(ErrorCode::FunctionExit),
            Self::InvalidInput(_) | Self::Binding(_) => None,
        }
    }

    /// Raw payload attached for diagnostics.
    pub fn cause(&self) -> Option<&Value> {
        match self {
            Self::Protocol { cause, .. } | Self::Operation { cause, .. } => cause.as_ref(),
            Self::Execution { cause, .. } => Some(cause),
            _ => None,
        }
    }

    /// Validation violations, if this is a validation error.
    pub fn violations(&self) -> Option<&[Violation]> {
        match self {
            Self::Validation(err) => Some(err.violations()),
            _ => None,
        }
    }
}
