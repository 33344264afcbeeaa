use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::WorkItemSpec;

/// Operating mode for a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Preview only, no network calls
    DryRun,
    /// Create every item on the remote service
    Execute,
}

impl RunMode {
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run {
            RunMode::DryRun
        } else {
            RunMode::Execute
        }
    }

    pub fn is_dry_run(&self) -> bool {
        matches!(self, RunMode::DryRun)
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::DryRun => write!(f, "dry-run"),
            RunMode::Execute => write!(f, "execute"),
        }
    }
}

/// The full ordered set of work items processed in one invocation
#[derive(Debug, Clone)]
pub struct BatchRun {
    items: Vec<WorkItemSpec>,
    mode: RunMode,
}

impl BatchRun {
    pub fn new(items: Vec<WorkItemSpec>, mode: RunMode) -> Self {
        Self { items, mode }
    }

    pub fn items(&self) -> &[WorkItemSpec] {
        &self.items
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check every title before anything is submitted
    pub fn validate(&self) -> Result<(), BatchValidationError> {
        match self.items.iter().position(|i| i.title.trim().is_empty()) {
            Some(index) => Err(BatchValidationError::EmptyTitle { index }),
            None => Ok(()),
        }
    }
}

/// Malformed batch detected before submission starts
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchValidationError {
    #[error("item {index} has an empty title")]
    EmptyTitle { index: usize },
}
