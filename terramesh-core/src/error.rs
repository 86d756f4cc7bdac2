//! Error types for terramesh
//!
//! The pipeline is a one-shot batch tool: every error is fatal and aborts
//! the remaining stages. Each variant maps to a distinct process exit code
//! so callers and scripts can tell failure classes apart.

use thiserror::Error;

/// Main error type for terramesh operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error at line {line}: {message} (line was {content:?})")]
    Parse {
        line: usize,
        content: String,
        message: String,
    },

    #[error("geometry error: {0}")]
    Geometry(String),

    #[error("usage error: {0}")]
    Usage(String),

    #[error("render error: {0}")]
    Render(String),
}

impl Error {
    /// Build a parse error carrying the 1-based line number and offending line.
    pub fn parse(line: usize, content: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            content: content.into(),
            message: message.into(),
        }
    }

    /// Process exit code for this error class.
    ///
    /// Usage errors exit with 1, I/O with 2, parse with 3, geometry with 4,
    /// render/viewer failures with 5.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(_) => 1,
            Error::Io(_) => 2,
            Error::Parse { .. } => 3,
            Error::Geometry(_) => 4,
            Error::Render(_) => 5,
        }
    }
}
