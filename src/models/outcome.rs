use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a failed create call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceErrorKind {
    /// Credential rejected
    Authentication,
    /// Credential lacks the required scope or repository access
    Authorization,
    /// Request throttled by the remote service
    RateLimited,
    /// Request rejected as invalid, e.g. an unknown label
    Validation,
    /// Network or connection failure
    Transport,
    Unknown,
}

impl ResourceErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            ResourceErrorKind::Authentication => "AuthenticationError",
            ResourceErrorKind::Authorization => "AuthorizationError",
            ResourceErrorKind::RateLimited => "RateLimited",
            ResourceErrorKind::Validation => "ValidationError",
            ResourceErrorKind::Transport => "TransportError",
            ResourceErrorKind::Unknown => "UnknownError",
        }
    }
}

impl fmt::Display for ResourceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Identifier and location of a resource the remote service created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResource {
    pub id: String,
    pub url: String,
}

/// Normalized failure of a single create call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ResourceFailure {
    pub kind: ResourceErrorKind,
    pub message: String,
}

impl ResourceFailure {
    pub fn new(kind: ResourceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// What happened to one work item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemOutcome {
    Previewed,
    Created { id: String, url: String },
    Failed { kind: ResourceErrorKind, message: String },
}

impl ItemOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, ItemOutcome::Created { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ItemOutcome::Failed { .. })
    }

    pub fn error_kind(&self) -> Option<ResourceErrorKind> {
        match self {
            ItemOutcome::Failed { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl From<Result<CreatedResource, ResourceFailure>> for ItemOutcome {
    fn from(result: Result<CreatedResource, ResourceFailure>) -> Self {
        match result {
            Ok(CreatedResource { id, url }) => ItemOutcome::Created { id, url },
            Err(ResourceFailure { kind, message }) => ItemOutcome::Failed { kind, message },
        }
    }
}
