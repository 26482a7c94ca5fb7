pub mod coverage;
pub mod dataset_summarizer;

pub use coverage::{audit_coverage, CoverageReport, ExpectedAbsent};
pub use dataset_summarizer::{DatasetOutcome, DatasetSummarizer};
