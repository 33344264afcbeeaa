//! Integration tests for the GitHub client against a mock server

use std::collections::BTreeSet;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use issuebatch::core::{GitHubClient, ResourceClient};
use issuebatch::models::{CreatedResource, GitHubConfig, ResourceErrorKind};

const ISSUES_PATH: &str = "/repos/octo/hello/issues";

fn client_for(server: &MockServer) -> GitHubClient {
    let config = GitHubConfig {
        api_url: server.uri(),
        repository: Some("octo/hello".to_string()),
        token: Some("ghp_testtoken".to_string()),
        timeout_seconds: 5,
    };
    GitHubClient::new(&config).unwrap()
}

fn labels(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

async fn failure_for(template: ResponseTemplate) -> (ResourceErrorKind, String) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ISSUES_PATH))
        .respond_with(template)
        .mount(&server)
        .await;

    let failure = client_for(&server)
        .create_resource("Title", "Body", &labels(&["bug"]))
        .await
        .unwrap_err();
    (failure.kind, failure.message)
}

#[tokio::test]
async fn test_create_issue_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ISSUES_PATH))
        .and(header("authorization", "Bearer ghp_testtoken"))
        .and(header("accept", "application/vnd.github+json"))
        .and(body_json(serde_json::json!({
            "title": "Add search",
            "body": "## Why",
            "labels": ["enhancement", "ui"],
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "number": 42,
            "title": "Add search",
            "html_url": "https://github.com/octo/hello/issues/42",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client_for(&server)
        .create_resource("Add search", "## Why", &labels(&["ui", "enhancement"]))
        .await
        .unwrap();

    assert_eq!(
        created,
        CreatedResource {
            id: "42".to_string(),
            url: "https://github.com/octo/hello/issues/42".to_string(),
        }
    );
}

#[tokio::test]
async fn test_bad_credentials() {
    let (kind, message) = failure_for(
        ResponseTemplate::new(401).set_body_json(serde_json::json!({"message": "Bad credentials"})),
    )
    .await;
    assert_eq!(kind, ResourceErrorKind::Authentication);
    assert_eq!(message, "HTTP 401: Bad credentials");
}

#[tokio::test]
async fn test_forbidden_without_scope() {
    let (kind, _) = failure_for(
        ResponseTemplate::new(403)
            .insert_header("x-ratelimit-remaining", "4999")
            .set_body_json(serde_json::json!({
                "message": "Resource not accessible by personal access token"
            })),
    )
    .await;
    assert_eq!(kind, ResourceErrorKind::Authorization);
}

#[tokio::test]
async fn test_primary_rate_limit() {
    let (kind, _) = failure_for(
        ResponseTemplate::new(403)
            .insert_header("x-ratelimit-remaining", "0")
            .set_body_json(serde_json::json!({"message": "API rate limit exceeded"})),
    )
    .await;
    assert_eq!(kind, ResourceErrorKind::RateLimited);
}

#[tokio::test]
async fn test_too_many_requests() {
    let (kind, _) = failure_for(ResponseTemplate::new(429)).await;
    assert_eq!(kind, ResourceErrorKind::RateLimited);
}

#[tokio::test]
async fn test_unknown_label_is_validation_error() {
    let (kind, message) = failure_for(ResponseTemplate::new(422).set_body_json(serde_json::json!({
        "message": "Validation Failed",
        "errors": [{"value": "bug", "resource": "Label", "field": "name", "code": "invalid"}],
    })))
    .await;
    assert_eq!(kind, ResourceErrorKind::Validation);
    assert_eq!(message, "HTTP 422: Validation Failed (Label.name invalid: bug)");
}

#[tokio::test]
async fn test_repository_not_visible() {
    let (kind, _) = failure_for(
        ResponseTemplate::new(404).set_body_json(serde_json::json!({"message": "Not Found"})),
    )
    .await;
    assert_eq!(kind, ResourceErrorKind::Authorization);
}

#[tokio::test]
async fn test_server_error_is_unknown() {
    let (kind, message) =
        failure_for(ResponseTemplate::new(502).set_body_string("Bad Gateway")).await;
    assert_eq!(kind, ResourceErrorKind::Unknown);
    assert_eq!(message, "HTTP 502: Bad Gateway");
}

#[tokio::test]
async fn test_created_with_unexpected_body_is_unknown() {
    let (kind, _) = failure_for(ResponseTemplate::new(201).set_body_string("ok")).await;
    assert_eq!(kind, ResourceErrorKind::Unknown);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Pooled servers keep listening after drop; use an exclusive one
    let server = MockServer::builder().start().await;
    let client = client_for(&server);
    drop(server);

    let failure = client
        .create_resource("Title", "", &BTreeSet::new())
        .await
        .unwrap_err();
    assert_eq!(failure.kind, ResourceErrorKind::Transport);
}
