use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::core::ProgressObserver;
use crate::error::IssueBatchError;
use crate::models::{BatchReport, BatchRun, ItemOutcome, RunMode, WorkItemSpec};

const RULE_WIDTH: usize = 80;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Prints live progress lines while a batch is submitted
#[derive(Debug, Default)]
pub struct ConsoleProgress;

impl ProgressObserver for ConsoleProgress {
    fn item_started(&mut self, index: usize, total: usize, item: &WorkItemSpec) {
        println!("\n[{}/{}] Creating: {}", index + 1, total, item.title);
    }

    fn item_finished(&mut self, _index: usize, _item: &WorkItemSpec, outcome: &ItemOutcome) {
        match outcome {
            ItemOutcome::Created { url, .. } => println!("✓ Created: {}", url),
            ItemOutcome::Failed { kind, message } => {
                println!("✗ Failed to create issue: {}: {}", kind, message)
            }
            ItemOutcome::Previewed => {}
        }
    }
}

/// Dry-run listing of what would be created
pub struct Preview<'a> {
    batch: &'a BatchRun,
    preview_chars: usize,
}

impl fmt::Display for Preview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nDRY RUN - Issues that would be created:")?;
        writeln!(f, "{}", rule())?;
        for (i, item) in self.batch.items().iter().enumerate() {
            writeln!(f, "\n{}. {}", i + 1, item.title)?;
            writeln!(f, "   Labels: {}", item.label_list().join(", "))?;
            writeln!(f, "   Body preview: {}", item.body_preview(self.preview_chars))?;
        }
        writeln!(f, "\n{}", rule())?;
        writeln!(f, "\nTo create these issues, run without --dry-run flag")
    }
}

pub fn render_preview(batch: &BatchRun, preview_chars: usize) -> String {
    Preview {
        batch,
        preview_chars,
    }
    .to_string()
}

/// Summary block printed after an executed batch
pub struct Summary<'a> {
    batch: &'a BatchRun,
    report: &'a BatchReport,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        writeln!(f, "\n{}", rule())?;
        writeln!(f, "\nSummary:")?;
        writeln!(f, "  Total issues: {}", report.total())?;
        writeln!(f, "  Successfully created: {}", report.created())?;
        writeln!(f, "  Failed: {}", report.failed())?;

        let paired = || self.batch.items().iter().zip(report.results());

        if report.created() > 0 {
            writeln!(f, "\n✓ Created issues:")?;
            for (item, outcome) in paired() {
                if let ItemOutcome::Created { id, url } = outcome {
                    writeln!(f, "  - #{}: {}", id, item.title)?;
                    writeln!(f, "    {}", url)?;
                }
            }
        }

        if report.failed() > 0 {
            writeln!(f, "\n✗ Failed issues:")?;
            for (item, outcome) in paired() {
                if let ItemOutcome::Failed { kind, message } = outcome {
                    writeln!(f, "  - {}", item.title)?;
                    writeln!(f, "    {}: {}", kind, message)?;
                }
            }
            Ok(())
        } else {
            writeln!(f, "\n✓ All issues created successfully!")
        }
    }
}

pub fn render_summary(batch: &BatchRun, report: &BatchReport) -> String {
    Summary { batch, report }.to_string()
}

/// Machine-readable report, written with `--report-json`
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub repository: &'a str,
    pub mode: RunMode,
    pub total: usize,
    pub created: usize,
    pub failed: usize,
    pub overall_success: bool,
    pub items: Vec<JsonReportItem<'a>>,
}

#[derive(Debug, Serialize)]
pub struct JsonReportItem<'a> {
    pub index: usize,
    pub title: &'a str,
    pub outcome: &'a ItemOutcome,
}

impl<'a> JsonReport<'a> {
    pub fn new(repository: &'a str, batch: &'a BatchRun, report: &'a BatchReport) -> Self {
        let items = batch
            .items()
            .iter()
            .zip(report.results())
            .enumerate()
            .map(|(index, (item, outcome))| JsonReportItem {
                index,
                title: &item.title,
                outcome,
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            repository,
            mode: batch.mode(),
            total: report.total(),
            created: report.created(),
            failed: report.failed(),
            overall_success: report.overall_success(),
            items,
        }
    }
}

pub fn write_json_report(
    path: &Path,
    repository: &str,
    batch: &BatchRun,
    report: &BatchReport,
) -> Result<(), IssueBatchError> {
    let json = serde_json::to_string_pretty(&JsonReport::new(repository, batch, report))?;
    fs::write(path, json)?;
    Ok(())
}
