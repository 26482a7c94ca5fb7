pub mod parallel_summarizer;

pub use parallel_summarizer::{ParallelSummarizer, SummaryRun};
