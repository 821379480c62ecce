//! Reply decoding for the remote execution endpoint.
//!
//! A reply nests the operation output several levels deep:
//!
//! ```text
//! { "code": "200",
//!   "results": [ { "result": { "exit_code": 0, "stderr": "", "stdout": "<json>" } } ] }
//! ```
//!
//! where `stdout` encodes `{ "success": bool, "data": ..., "error": {...} }`.
//! Each layer is checked in a fixed order and the first failing check
//! decides the error code.

use reqwest::{Response, StatusCode};
use serde_json::{Map, Value, json};

use crate::error::{BlessCrawlError, ErrorCode, Result};

const NO_DETAILS: &str = "No error details available";

/// Check status, read the body, and decode it.
pub async fn decode_response(response: Response) -> Result<Value> {
    check_status(response.status())?;
    let body = response.text().await.map_err(BlessCrawlError::transport)?;
    decode_reply(parse_reply(&body)?)
}

/// Non-2xx statuses are transport failures.
pub fn check_status(status: StatusCode) -> Result<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(BlessCrawlError::http_status(
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown Status"),
        ))
    }
}

/// The body must be a JSON object.
pub fn parse_reply(body: &str) -> Result<Value> {
    match serde_json::from_str::<Value>(body) {
        Ok(reply @ Value::Object(_)) => Ok(reply),
        Ok(_) | Err(_) => Err(BlessCrawlError::protocol(
            ErrorCode::ResponseFormat,
            "Response body is not a JSON object",
            None,
        )),
    }
}

/// Extract the operation `data` from a parsed reply.
pub fn decode_reply(reply: Value) -> Result<Value> {
    check_code(&reply)?;
    let first = first_result(&reply)?;
    let result = function_result(first)?;
    check_exit(result)?;
    let stdout = stdout_text(result)?;
    let output = output_object(parse_stdout(stdout)?)?;
    check_success(&output)?;
    take_data(output)
}

fn check_code(reply: &Value) -> Result<()> {
    match reply.get("code") {
        Some(Value::String(code)) if code == "200" => Ok(()),
        other => Err(BlessCrawlError::protocol(
            ErrorCode::FunctionExecution,
            format!(
                "Function execution failed with code: {}",
                other.map_or_else(|| "missing".to_string(), Value::to_string)
            ),
            Some(reply.clone()),
        )),
    }
}

fn first_result(reply: &Value) -> Result<&Value> {
    reply
        .get("results")
        .and_then(Value::as_array)
        .and_then(|results| results.first())
        .ok_or_else(|| {
            BlessCrawlError::protocol(
                ErrorCode::NoResults,
                "No results returned from function execution",
                Some(reply.clone()),
            )
        })
}

fn function_result(first: &Value) -> Result<&Value> {
    match first.get("result") {
        Some(result) if !result.is_null() => Ok(result),
        _ => Err(BlessCrawlError::protocol(
            ErrorCode::ResultFormat,
            "Function result is missing",
            Some(first.clone()),
        )),
    }
}

fn check_exit(result: &Value) -> Result<()> {
    let exit_code = result.get("exit_code");
    let is_zero = exit_code
        .and_then(Value::as_f64)
        .is_some_and(|code| code == 0.0);
    if is_zero {
        return Ok(());
    }

    let stderr = result
        .get("stderr")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(NO_DETAILS);
    Err(BlessCrawlError::Execution {
        exit_code: exit_code.and_then(Value::as_i64),
        message: format!(
            "Function exited with code {}: {}",
            exit_code.map_or_else(|| "unknown".to_string(), Value::to_string),
            stderr
        ),
        cause: result.clone(),
    })
}

fn stdout_text(result: &Value) -> Result<&str> {
    result.get("stdout").and_then(Value::as_str).ok_or_else(|| {
        BlessCrawlError::protocol(
            ErrorCode::StdoutFormat,
            "Function stdout is missing or not a string",
            Some(result.clone()),
        )
    })
}

fn parse_stdout(stdout: &str) -> Result<Value> {
    serde_json::from_str(stdout).map_err(|e| {
        BlessCrawlError::protocol(
            ErrorCode::StdoutParse,
            format!("Failed to parse function stdout as JSON: {e}"),
            Some(json!({ "stdout": stdout, "parseError": e.to_string() })),
        )
    })
}

fn output_object(output: Value) -> Result<Map<String, Value>> {
    match output {
        Value::Object(obj) => Ok(obj),
        other => Err(BlessCrawlError::protocol(
            ErrorCode::StdinOutputFormat,
            "Function output is not a JSON object",
            Some(other),
        )),
    }
}

fn check_success(output: &Map<String, Value>) -> Result<()> {
    if is_truthy(output.get("success")) {
        return Ok(());
    }

    let error = output.get("error");
    let message = error
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .unwrap_or("Operation failed");
    let code = error
        .and_then(|e| e.get("code"))
        .and_then(Value::as_str)
        .map_or(ErrorCode::Operation, ErrorCode::parse);
    let cause = error
        .and_then(|e| e.get("details"))
        .or(error)
        .filter(|v| !v.is_null())
        .cloned();

    Err(BlessCrawlError::Operation {
        code,
        message: message.to_string(),
        cause,
    })
}

fn take_data(mut output: Map<String, Value>) -> Result<Value> {
    if output.get("data").is_none_or(Value::is_null) {
        return Err(BlessCrawlError::protocol(
            ErrorCode::NoData,
            "Operation returned no data",
            Some(Value::Object(output)),
        ));
    }
    Ok(output.remove("data").unwrap_or_default())
}

/// Loose truthiness, matching what the executor emits for `success`.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}
