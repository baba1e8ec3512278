//! Unified error type for the fatal failures of the tagging pipeline.
//!
//! `AppError` is returned by every stage that touches the filesystem. Row-level
//! problems never surface here; they are reported through the event sink and
//! tallied by the stage that found them.

/// Application-level error returned by the pipeline stages.
///
/// Each variant maps to a distinct failure domain and carries a human-readable
/// description that already names the offending path.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The lookup file is missing or unreadable.
    #[error("{0}")]
    Lookup(String),

    /// The flow-log file is missing or unreadable.
    #[error("{0}")]
    FlowLog(String),

    /// The report could not be written.
    #[error("{0}")]
    Report(String),

    /// Other I/O and OS-level errors (directory creation, path resolution).
    #[error("{0}")]
    Io(String),

    /// Invalid or missing user input.
    #[error("{0}")]
    InvalidInput(String),
}

impl AppError {
    /// Returns the error kind as a string matching the variant name.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Lookup(_) => "Lookup",
            AppError::FlowLog(_) => "FlowLog",
            AppError::Report(_) => "Report",
            AppError::Io(_) => "Io",
            AppError::InvalidInput(_) => "InvalidInput",
        }
    }
}
