use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AuditError>;

/// Exit status for any condition that stops a report from being produced.
pub const EXIT_FATAL: u8 = 2;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("{} is missing the '{column}' header", path.display())]
    MalformedHeader { path: PathBuf, column: String },

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl AuditError {
    pub fn exit_code(&self) -> u8 {
        EXIT_FATAL
    }
}

impl From<config::ConfigError> for AuditError {
    fn from(err: config::ConfigError) -> Self {
        AuditError::Config(err.to_string())
    }
}
