use serde::Deserialize;
use std::collections::BTreeSet;

/// A single issue to create: title, Markdown body and label set.
///
/// Labels are kept in a sorted set so duplicates collapse and the order they
/// were written in does not matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItemSpec {
    pub title: String,
    pub body: String,
    pub labels: BTreeSet<String>,
}

/// Record as it appears in an items file, before validation
#[derive(Debug, Clone, Deserialize)]
pub struct RawWorkItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl WorkItemSpec {
    /// Create a work item from its parts
    pub fn new<I, S>(title: impl Into<String>, body: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            body: body.into(),
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Check the title is not blank and no label is blank
    pub fn validate(&self) -> Result<(), WorkItemError> {
        if self.title.trim().is_empty() {
            return Err(WorkItemError::EmptyTitle);
        }
        if self.labels.iter().any(|l| l.trim().is_empty()) {
            return Err(WorkItemError::EmptyLabel);
        }
        Ok(())
    }

    /// Labels in sorted order, as sent to the remote service
    pub fn label_list(&self) -> Vec<String> {
        self.labels.iter().cloned().collect()
    }

    /// First `max_chars` characters of the body, marked with "..." when cut
    pub fn body_preview(&self, max_chars: usize) -> String {
        match self.body.char_indices().nth(max_chars) {
            Some((cut, _)) => format!("{}...", &self.body[..cut]),
            None => self.body.clone(),
        }
    }
}

impl TryFrom<RawWorkItem> for WorkItemSpec {
    type Error = WorkItemError;

    fn try_from(raw: RawWorkItem) -> Result<Self, Self::Error> {
        let title = raw.title.ok_or(WorkItemError::MissingTitle)?;
        let labels = raw
            .labels
            .into_iter()
            .map(|l| l.trim().to_string())
            .collect::<BTreeSet<_>>();

        let item = WorkItemSpec {
            title: title.trim().to_string(),
            body: raw.body.unwrap_or_default(),
            labels,
        };
        item.validate()?;
        Ok(item)
    }
}

/// Errors found while validating a single work item
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkItemError {
    #[error("missing required field 'title'")]
    MissingTitle,

    #[error("title must not be empty")]
    EmptyTitle,

    #[error("labels must not be empty strings")]
    EmptyLabel,
}
