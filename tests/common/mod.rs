//! Common test utilities

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tracing::Level;

use issuebatch::core::ResourceClient;
use issuebatch::models::{CreatedResource, ResourceErrorKind, ResourceFailure, WorkItemSpec};

/// One call seen by [`RecordingClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
}

/// In-memory client that records every call and fails on chosen call indexes
#[derive(Default)]
pub struct RecordingClient {
    calls: Mutex<Vec<RecordedCall>>,
    failures: Vec<(usize, ResourceErrorKind)>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the call at `index` (0-based) with `kind`
    pub fn failing_at(mut self, index: usize, kind: ResourceErrorKind) -> Self {
        self.failures.push((index, kind));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ResourceClient for RecordingClient {
    async fn create_resource(
        &self,
        title: &str,
        body: &str,
        labels: &BTreeSet<String>,
    ) -> Result<CreatedResource, ResourceFailure> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(RecordedCall {
                title: title.to_string(),
                body: body.to_string(),
                labels: labels.iter().cloned().collect(),
            });
            calls.len() - 1
        };

        if let Some((_, kind)) = self.failures.iter().find(|(i, _)| *i == index) {
            return Err(ResourceFailure::new(*kind, format!("mock failure for '{}'", title)));
        }

        let id = (index + 1).to_string();
        Ok(CreatedResource {
            url: format!("https://github.com/octo/hello/issues/{}", id),
            id,
        })
    }
}

/// `n` valid work items titled "Issue 0".."Issue n-1"
pub fn sample_items(n: usize) -> Vec<WorkItemSpec> {
    (0..n)
        .map(|i| {
            WorkItemSpec::new(
                format!("Issue {}", i),
                format!("## Description\n\nBody of issue {}.", i),
                ["enhancement"],
            )
        })
        .collect()
}

/// Temp directory to act as the working directory of a run
pub fn create_test_project() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let project_root = temp_dir.path().to_path_buf();
    (temp_dir, project_root)
}

/// Write a JSON items file with `n` sample items
pub fn write_json_items(project_root: &Path, filename: &str, n: usize) -> PathBuf {
    let items: Vec<serde_json::Value> = (0..n)
        .map(|i| {
            serde_json::json!({
                "title": format!("Issue {}", i),
                "body": format!("Body of issue {}", i),
                "labels": ["enhancement", "good first issue"],
            })
        })
        .collect();
    let path = project_root.join(filename);
    fs::write(&path, serde_json::to_string_pretty(&items).unwrap())
        .expect("Failed to write items file");
    path
}

/// Write a Markdown item file with YAML frontmatter
pub fn write_markdown_item(dir: &Path, filename: &str, title: &str, labels: &[&str], body: &str) {
    fs::create_dir_all(dir).expect("Failed to create items dir");
    let labels_yaml = labels
        .iter()
        .map(|l| format!("  - {}", l))
        .collect::<Vec<_>>()
        .join("\n");
    let content = format!(
        "---\ntitle: {}\nlabels:\n{}\n---\n\n{}\n",
        title, labels_yaml, body
    );
    fs::write(dir.join(filename), content).expect("Failed to write item file");
}

/// In-memory sink for formatted log output
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Subscriber that writes to this sink at `level` and above
    pub fn subscriber(&self, level: Level) -> impl tracing::Subscriber + Send + Sync {
        let sink = self.clone();
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_target(false)
            .without_time()
            .with_writer(move || sink.clone())
            .finish()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
