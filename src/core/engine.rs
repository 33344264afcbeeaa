//! Sequential submission loop.
//!
//! Items are submitted one at a time in batch order. A failed item is recorded
//! and the loop moves on; only a malformed batch stops the run, and it does so
//! before anything is sent.

use std::time::Duration;
use tracing::debug;

use crate::core::ResourceClient;
use crate::error::IssueBatchError;
use crate::models::{BatchReport, BatchRun, ItemOutcome, ReportBuilder, RunMode, WorkItemSpec};

/// Default pause between two create calls
pub const DEFAULT_PACE: Duration = Duration::from_secs(1);

/// Receives per-item progress from the engine
pub trait ProgressObserver {
    fn item_started(&mut self, _index: usize, _total: usize, _item: &WorkItemSpec) {}
    fn item_finished(&mut self, _index: usize, _item: &WorkItemSpec, _outcome: &ItemOutcome) {}
}

/// Observer that ignores every event
pub struct NoProgress;

impl ProgressObserver for NoProgress {}

/// Drives a [`BatchRun`] through a [`ResourceClient`]
#[derive(Debug, Clone)]
pub struct SubmissionEngine {
    pace: Duration,
}

impl Default for SubmissionEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PACE)
    }
}

impl SubmissionEngine {
    pub fn new(pace: Duration) -> Self {
        Self { pace }
    }

    pub fn pace(&self) -> Duration {
        self.pace
    }

    /// Preview the batch without a client; every item is `Previewed`
    pub fn preview(&self, batch: &BatchRun) -> Result<BatchReport, IssueBatchError> {
        batch.validate()?;
        Ok(batch.items().iter().map(|_| ItemOutcome::Previewed).collect())
    }

    /// Run the batch and return one outcome per item
    pub async fn run<C>(&self, batch: &BatchRun, client: &C) -> Result<BatchReport, IssueBatchError>
    where
        C: ResourceClient + ?Sized,
    {
        self.run_with_progress(batch, client, &mut NoProgress).await
    }

    /// Same as [`run`](Self::run), reporting each item to `observer`
    pub async fn run_with_progress<C, O>(
        &self,
        batch: &BatchRun,
        client: &C,
        observer: &mut O,
    ) -> Result<BatchReport, IssueBatchError>
    where
        C: ResourceClient + ?Sized,
        O: ProgressObserver + ?Sized,
    {
        batch.validate()?;

        let total = batch.len();
        let mut report = ReportBuilder::with_capacity(total);

        if batch.mode() == RunMode::DryRun {
            for (index, item) in batch.items().iter().enumerate() {
                observer.item_started(index, total, item);
                let outcome = ItemOutcome::Previewed;
                observer.item_finished(index, item, &outcome);
                report.record(outcome);
            }
            return Ok(report.finish());
        }

        debug!("Submitting {} items", total);

        for (index, item) in batch.items().iter().enumerate() {
            observer.item_started(index, total, item);
            debug!("Submitting item {} of {}: {}", index + 1, total, item.title);

            let outcome: ItemOutcome = client
                .create_resource(&item.title, &item.body, &item.labels)
                .await
                .into();

            match &outcome {
                ItemOutcome::Created { id, url } => debug!("Created #{} at {}", id, url),
                ItemOutcome::Failed { kind, message } => {
                    debug!("Item {} '{}' failed: {}: {}", index + 1, item.title, kind, message)
                }
                ItemOutcome::Previewed => {}
            }

            observer.item_finished(index, item, &outcome);
            report.record(outcome);

            if index + 1 < total && !self.pace.is_zero() {
                tokio::time::sleep(self.pace).await;
            }
        }

        let report = report.finish();
        debug!(
            "Batch complete: {} created, {} failed of {}",
            report.created(),
            report.failed(),
            report.total()
        );
        Ok(report)
    }
}
