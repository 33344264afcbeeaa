use async_trait::async_trait;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::debug;

use crate::core::ResourceClient;
use crate::error::GitHubError;
use crate::models::{CreatedResource, GitHubConfig, ResourceErrorKind, ResourceFailure};

const API_VERSION: &str = "2022-11-28";
const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// GitHub Issues API client
pub struct GitHubClient {
    client: Client,
    issues_url: String,
}

/// Request body for the create-issue endpoint
#[derive(Debug, Serialize)]
struct CreateIssueRequest<'a> {
    title: &'a str,
    body: &'a str,
    labels: Vec<&'a str>,
}

/// The parts of a created issue we keep
#[derive(Debug, Deserialize)]
struct CreatedIssue {
    number: u64,
    html_url: String,
}

/// Error body returned by the GitHub REST API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

/// Check a repository slug has the `owner/name` shape.
///
/// Owners are alphanumeric with inner hyphens. Names may also hold `.` and `_`
/// but never `.` or `..` alone, which would rewrite the request path.
pub fn validate_repository(repository: &str) -> Result<(), GitHubError> {
    let invalid = || GitHubError::InvalidRepository(repository.to_string());
    let slug = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]*/([A-Za-z0-9_.-]+)$").map_err(|_| invalid())?;
    let name = slug
        .captures(repository)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or_else(invalid)?;
    if name == "." || name == ".." {
        return Err(invalid());
    }
    Ok(())
}

/// Repository from the config, validated
pub fn resolve_repository(config: &GitHubConfig) -> Result<&str, GitHubError> {
    let repository = config
        .repository
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .ok_or(GitHubError::MissingRepository)?;
    validate_repository(repository)?;
    Ok(repository)
}

impl GitHubClient {
    /// Create a client for the configured repository.
    ///
    /// Fails when the repository or token is missing; the token is resolved
    /// once here and reused for every request of the run.
    pub fn new(config: &GitHubConfig) -> Result<Self, GitHubError> {
        let repository = resolve_repository(config)?;
        let token = config
            .token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or(GitHubError::MissingToken)?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .map_err(|e| GitHubError::InvalidToken(e.to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(
            HeaderName::from_static("x-github-api-version"),
            HeaderValue::from_static(API_VERSION),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("issuebatch/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        let issues_url = format!(
            "{}/repos/{}/issues",
            config.api_url.trim_end_matches('/'),
            repository
        );

        Ok(Self { client, issues_url })
    }

}

#[async_trait]
impl ResourceClient for GitHubClient {
    async fn create_resource(
        &self,
        title: &str,
        body: &str,
        labels: &BTreeSet<String>,
    ) -> Result<CreatedResource, ResourceFailure> {
        let request = CreateIssueRequest {
            title,
            body,
            labels: labels.iter().map(String::as_str).collect(),
        };

        debug!("POST {} ({} labels)", self.issues_url, request.labels.len());

        let response = self
            .client
            .post(&self.issues_url)
            .json(&request)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        let remaining = response
            .headers()
            .get(RATE_LIMIT_REMAINING)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let text = response.text().await.map_err(classify_send_error)?;

        if status == StatusCode::CREATED {
            return match serde_json::from_str::<CreatedIssue>(&text) {
                Ok(issue) => Ok(CreatedResource {
                    id: issue.number.to_string(),
                    url: issue.html_url,
                }),
                Err(e) => Err(ResourceFailure::new(
                    ResourceErrorKind::Unknown,
                    format!("HTTP 201: unexpected response body: {}", e),
                )),
            };
        }

        let detail = error_detail(&text);
        let kind = classify_status(status, remaining.as_deref(), &detail);
        Err(ResourceFailure::new(
            kind,
            format!("HTTP {}: {}", status.as_u16(), detail),
        ))
    }
}

fn classify_send_error(err: reqwest::Error) -> ResourceFailure {
    if err.is_builder() {
        ResourceFailure::new(ResourceErrorKind::Unknown, err.to_string())
    } else if err.is_timeout() {
        ResourceFailure::new(ResourceErrorKind::Transport, format!("request timed out: {}", err))
    } else {
        ResourceFailure::new(ResourceErrorKind::Transport, err.to_string())
    }
}

/// Map a non-201 response onto the closed error kind set
fn classify_status(
    status: StatusCode,
    rate_remaining: Option<&str>,
    detail: &str,
) -> ResourceErrorKind {
    match status {
        StatusCode::UNAUTHORIZED => ResourceErrorKind::Authentication,
        StatusCode::FORBIDDEN => {
            let exhausted = rate_remaining.map(str::trim) == Some("0");
            if exhausted || detail.to_lowercase().contains("rate limit") {
                ResourceErrorKind::RateLimited
            } else {
                ResourceErrorKind::Authorization
            }
        }
        // GitHub answers 404 for repositories the token cannot see
        StatusCode::NOT_FOUND => ResourceErrorKind::Authorization,
        StatusCode::TOO_MANY_REQUESTS => ResourceErrorKind::RateLimited,
        StatusCode::UNPROCESSABLE_ENTITY => ResourceErrorKind::Validation,
        _ => ResourceErrorKind::Unknown,
    }
}

/// Human-readable detail from an error response body
fn error_detail(text: &str) -> String {
    let Ok(body) = serde_json::from_str::<ApiErrorBody>(text) else {
        let trimmed = text.trim();
        return if trimmed.is_empty() {
            "(empty response body)".to_string()
        } else {
            trimmed.to_string()
        };
    };

    let details: Vec<String> = body.errors.iter().filter_map(describe_error_entry).collect();
    if details.is_empty() {
        body.message
    } else {
        format!("{} ({})", body.message, details.join("; "))
    }
}

fn describe_error_entry(entry: &serde_json::Value) -> Option<String> {
    if let Some(s) = entry.as_str() {
        return Some(s.to_string());
    }
    let obj = entry.as_object()?;
    if let Some(message) = obj.get("message").and_then(|m| m.as_str()) {
        return Some(message.to_string());
    }

    let field = |key: &str| obj.get(key).and_then(|v| v.as_str()).unwrap_or_default();
    let mut out = match (field("resource"), field("field")) {
        ("", "") => String::new(),
        (resource, "") => resource.to_string(),
        ("", name) => name.to_string(),
        (resource, name) => format!("{}.{}", resource, name),
    };
    let code = field("code");
    if !code.is_empty() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(code);
    }
    if let Some(value) = obj.get("value") {
        let value = value.as_str().map(str::to_owned).unwrap_or_else(|| value.to_string());
        out.push_str(&format!(": {}", value));
    }
    (!out.is_empty()).then_some(out)
}
