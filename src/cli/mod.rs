pub mod args;
pub mod commands;

pub use args::{Cli, Commands};
pub use commands::{run, run_coverage, run_summarize, run_with_output};
