use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a run. Configuration problems are detected before
/// any attribution work starts; the rest abort a run in progress.
#[derive(Debug, Error)]
pub enum FameError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("'{}' is not a git repository", .0.display())]
    NotARepository(PathBuf),

    #[error("`{command}` failed: {stderr}")]
    Git { command: String, stderr: String },

    #[error("malformed blame output for {file} at line {line}: {reason}")]
    Parse { file: String, line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl FameError {
    /// Process exit status: 11 when configuration is rejected or attribution
    /// fails (git or blame output), 4 when the report cannot be written.
    pub fn exit_code(&self) -> i32 {
        match self {
            FameError::Config(_)
            | FameError::NotARepository(_)
            | FameError::Git { .. }
            | FameError::Parse { .. } => 11,
            FameError::Io(_) | FameError::Json(_) => 4,
        }
    }
}

pub type FameResult<T> = std::result::Result<T, FameError>;
