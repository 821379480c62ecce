//! Remote-mode tests against a mock execution endpoint.

use bless_crawl::models::{Format, LinkType};
use bless_crawl::{BlessCrawl, ErrorCode, ErrorKind, Mode};
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{Value, json};

const PATH: &str = "/execute";

fn client_for(server: &ServerGuard, extra: Value) -> BlessCrawl {
    let mut config = json!({
        "endpoint_url": format!("{}{}", server.url(), PATH),
        "function_id": "fn-test"
    });
    if let (Some(target), Value::Object(extra)) = (config.as_object_mut(), extra) {
        target.extend(extra);
    }
    BlessCrawl::new(config).unwrap()
}

/// Reply body wrapping `output` as the function's stdout.
fn reply(exit_code: i64, stdout: &Value, stderr: &str) -> String {
    json!({
        "code": "200",
        "results": [{
            "result": {
                "exit_code": exit_code,
                "stdout": stdout.to_string(),
                "stderr": stderr
            }
        }]
    })
    .to_string()
}

fn scrape_data() -> Value {
    json!({
        "success": true,
        "timestamp": 1,
        "format": "markdown",
        "content": "hi",
        "metadata": {"url": "https://example.com", "status_code": 200}
    })
}

fn scrape_output() -> Value {
    json!({
        "success": true,
        "operation": "scrape",
        "url": "https://example.com",
        "data": scrape_data()
    })
}

async fn mock_reply(server: &mut ServerGuard, body: String) -> Mock {
    server
        .mock("POST", PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

#[tokio::test]
async fn test_scrape_returns_operation_data() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_body(Matcher::PartialJson(json!({
            "function_id": "fn-test",
            "method": "blessnet.wasm",
            "config": {"permissions": ["https://example.com"]}
        })))
        .with_status(200)
        .with_body(reply(0, &scrape_output(), ""))
        .create_async()
        .await;

    let client = client_for(&server, json!({}));
    assert_eq!(client.mode(), Mode::Remote);

    let result = client
        .scrape(
            "https://example.com",
            json!({"format": "markdown", "timeout": 20000}),
        )
        .await
        .unwrap();

    assert_eq!(serde_json::to_value(&result).unwrap(), scrape_data());
    assert_eq!(result.format, Format::Markdown);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_nonzero_exit_reports_code_and_stderr() {
    let mut server = mockito::Server::new_async().await;
    let _mock = mock_reply(&mut server, reply(1, &scrape_output(), "boom")).await;

    let client = client_for(&server, json!({}));
    let err = client
        .scrape(
            "https://example.com",
            json!({"format": "markdown", "timeout": 20000}),
        )
        .await
        .unwrap_err();

    assert_eq!(err.code(), Some(ErrorCode::FunctionExit));
    let message = err.to_string();
    assert!(message.contains('1'), "{message}");
    assert!(message.contains("boom"), "{message}");
}

#[tokio::test]
async fn test_empty_url_makes_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("POST", PATH).expect(0).create_async().await;

    let client = client_for(&server, json!({}));
    let err = client.map("", json!({})).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_out_of_range_depth_makes_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("POST", PATH).expect(0).create_async().await;

    let client = client_for(&server, json!({}));
    let err = client
        .crawl("https://example.com", json!({"max_depth": 6}))
        .await
        .unwrap_err();

    assert_eq!(err.code(), Some(ErrorCode::Validation));
    assert!(
        err.violations()
            .unwrap()
            .iter()
            .any(|v| v.path == "max_depth")
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_failure_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(500)
        .with_body("oops")
        .create_async()
        .await;

    let client = client_for(&server, json!({}));
    let err = client
        .scrape("https://example.com", Value::Null)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.code(), Some(ErrorCode::Http));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    // nothing listens on port 1
    let client = BlessCrawl::new(json!({
        "endpoint_url": "http://127.0.0.1:1/execute",
        "function_id": "fn-test"
    }))
    .unwrap();

    let err = client
        .scrape("https://example.com", Value::Null)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.code(), Some(ErrorCode::Http));
    assert!(err.to_string().starts_with("HTTP error:"), "{err}");
}

#[tokio::test]
async fn test_operation_error_keeps_remote_code() {
    let mut server = mockito::Server::new_async().await;
    let output = json!({
        "success": false,
        "error": {
            "code": "NAVIGATION_TIMEOUT",
            "message": "page did not load",
            "details": {"after_ms": 30000}
        }
    });
    let _mock = mock_reply(&mut server, reply(0, &output, "")).await;

    let client = client_for(&server, json!({}));
    let err = client
        .crawl("https://example.com", json!({"limit": 5}))
        .await
        .unwrap_err();

    assert_eq!(
        err.code(),
        Some(ErrorCode::Remote("NAVIGATION_TIMEOUT".into()))
    );
    assert_eq!(err.to_string(), "page did not load");
    assert_eq!(err.cause(), Some(&json!({"after_ms": 30000})));
}

#[tokio::test]
async fn test_client_defaults_merge_under_call_options() {
    let mut server = mockito::Server::new_async().await;
    let map_output = json!({
        "success": true,
        "data": {
            "url": "https://example.com",
            "links": [
                {"url": "https://example.com/a", "link_type": "internal"},
                {"url": "https://other.org/", "link_type": "external"}
            ],
            "total_links": 2,
            "timestamp": 5
        }
    });
    // The inner request is a JSON string, so its quotes arrive escaped.
    let mock = server
        .mock("POST", PATH)
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"timeout\\":15000"#.to_string()),
            Matcher::Regex(r#"format\\":\\"html"#.to_string()),
            Matcher::Regex(r#"link_types\\":\[\\"internal"#.to_string()),
        ]))
        .with_status(200)
        .with_body(reply(0, &map_output, ""))
        .create_async()
        .await;

    let client = client_for(&server, json!({"timeout": 15000, "format": "markdown"}));
    let result = client
        .map(
            "https://example.com",
            json!({"format": "html", "link_types": ["internal"]}),
        )
        .await
        .unwrap();

    assert_eq!(result.total_links, 2);
    assert_eq!(result.links_of(LinkType::External).count(), 1);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(reply(0, &scrape_output(), ""))
        .expect(3)
        .create_async()
        .await;

    let client = client_for(&server, json!({}));
    let (a, b, c) = tokio::join!(
        client.scrape("https://example.com", Value::Null),
        client.scrape("https://example.com/a", Value::Null),
        client.scrape("https://example.com/b", json!({"format": "html"})),
    );

    assert!(a.is_ok());
    assert!(b.is_ok());
    assert!(c.is_ok());
    mock.assert_async().await;
}
