use crate::analyzers::dataset_summarizer::{DatasetOutcome, DatasetSummarizer};
use crate::error::{AuditError, Result};
use crate::models::DatasetTarget;
use crate::utils::progress::ProgressReporter;
use rayon::prelude::*;
use tracing::info;

pub struct ParallelSummarizer {
    max_workers: usize,
    last_days: usize,
    show_progress: bool,
}

/// Outcomes in the same order as the input targets
pub struct SummaryRun {
    pub targets: Vec<DatasetTarget>,
    pub outcomes: Vec<DatasetOutcome>,
    pub last_days: usize,
}

impl SummaryRun {
    pub fn render(&self) -> String {
        self.targets
            .iter()
            .zip(&self.outcomes)
            .map(|(target, outcome)| outcome.render(target, self.last_days))
            .collect()
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(DatasetOutcome::is_failure)
    }
}

impl ParallelSummarizer {
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
            last_days: crate::utils::constants::DEFAULT_LAST_DAYS,
            show_progress: false,
        }
    }

    pub fn with_last_days(mut self, last_days: usize) -> Self {
        self.last_days = last_days;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Summarise every target on a rayon pool. Files are independent, so the
    /// only ordering constraint is on the collected output.
    pub fn run(&self, targets: Vec<DatasetTarget>) -> Result<SummaryRun> {
        info!(
            files = targets.len(),
            workers = self.max_workers,
            "summarising datasets"
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| AuditError::Config(e.to_string()))?;

        let summarizer = if self.show_progress {
            DatasetSummarizer::with_progress(ProgressReporter::new_spinner(
                "Scanning datasets...",
                false,
            ))
        } else {
            DatasetSummarizer::new()
        };

        let outcomes: Vec<DatasetOutcome> = pool.install(|| {
            targets
                .par_iter()
                .map(|target| summarizer.summarize_target(target))
                .collect()
        });
        summarizer.finish();

        Ok(SummaryRun {
            targets,
            outcomes,
            last_days: self.last_days,
        })
    }
}
