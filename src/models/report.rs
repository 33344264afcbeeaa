use crate::models::ItemOutcome;

/// Final accounting of a batch, index-aligned with the batch items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    total: usize,
    created: usize,
    failed: usize,
    results: Vec<ItemOutcome>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn created(&self) -> usize {
        self.created
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn previewed(&self) -> usize {
        self.total - self.created - self.failed
    }

    pub fn results(&self) -> &[ItemOutcome] {
        &self.results
    }

    pub fn overall_success(&self) -> bool {
        self.failed == 0
    }
}

/// Folds item outcomes into a [`BatchReport`]
#[derive(Debug, Default)]
pub struct ReportBuilder {
    created: usize,
    failed: usize,
    results: Vec<ItemOutcome>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            results: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::Created { .. } => self.created += 1,
            ItemOutcome::Failed { .. } => self.failed += 1,
            ItemOutcome::Previewed => {}
        }
        self.results.push(outcome);
    }

    pub fn finish(self) -> BatchReport {
        BatchReport {
            total: self.results.len(),
            created: self.created,
            failed: self.failed,
            results: self.results,
        }
    }
}

impl FromIterator<ItemOutcome> for BatchReport {
    fn from_iter<T: IntoIterator<Item = ItemOutcome>>(iter: T) -> Self {
        let mut builder = ReportBuilder::new();
        for outcome in iter {
            builder.record(outcome);
        }
        builder.finish()
    }
}
