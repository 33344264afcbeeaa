use std::path::PathBuf;
use thiserror::Error;

use crate::models::{BatchValidationError, ConfigError, WorkItemError};

/// Main error type for issuebatch
#[derive(Error, Debug)]
pub enum IssueBatchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Items file error: {0}")]
    ItemLoad(#[from] ItemLoadError),

    #[error("Configuration error: {0}")]
    InvalidBatch(#[from] BatchValidationError),

    #[error("{0}")]
    GitHub(#[from] GitHubError),

    #[error("Aborted by user")]
    Aborted,

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to reading the items file
#[derive(Error, Debug)]
pub enum ItemLoadError {
    #[error("{0} not found")]
    NotFound(PathBuf),

    #[error("Failed to read {0}: {1}")]
    ReadError(PathBuf, std::io::Error),

    #[error("Invalid JSON in {0}: {1}")]
    Json(PathBuf, serde_json::Error),

    #[error("Failed to parse frontmatter in {0}: {1}")]
    FrontmatterError(PathBuf, String),

    #[error("Invalid item {index} in {path}: {source}")]
    InvalidItem {
        path: PathBuf,
        index: usize,
        #[source]
        source: WorkItemError,
    },
}

/// Errors resolving the GitHub target or building the client
#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("GitHub token is required. Provide via --token or GITHUB_TOKEN env var")]
    MissingToken,

    #[error("Repository is required. Provide via --repo or GITHUB_REPOSITORY env var")]
    MissingRepository,

    #[error("Invalid repository '{0}': expected OWNER/REPO")]
    InvalidRepository(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl From<reqwest::Error> for GitHubError {
    fn from(err: reqwest::Error) -> Self {
        GitHubError::ClientBuild(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IssueBatchError>;
