//! Error types and exit codes for shrinkage
//!
//! Per-file failures (unreadable file, invalid text) are recovered where
//! they occur and never surface here; only run-fatal conditions do:
//! - 0: Success
//! - 1: Generic failure (enumeration or compression error)
//! - 2: Usage error (bad flags/args, handled by clap)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes reported by the shrinkage binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that abort an estimation run
#[derive(Error, Debug)]
pub enum ShrinkageError {
    #[error("root directory not found: {root:?}")]
    RootNotFound { root: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("compression failed: {0}")]
    Compression(std::io::Error),

    #[error("compression worker terminated unexpectedly")]
    CompressionWorker,

    #[error("{0}")]
    Other(String),
}

impl ShrinkageError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ShrinkageError::RootNotFound { .. }
            | ShrinkageError::Io(_)
            | ShrinkageError::Compression(_)
            | ShrinkageError::CompressionWorker
            | ShrinkageError::Other(_) => ExitCode::Failure,
        }
    }
}

/// Result type alias for shrinkage operations
pub type Result<T> = std::result::Result<T, ShrinkageError>;
