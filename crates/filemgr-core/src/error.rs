//! Error types for command execution.
//!
//! Every handler reports failure through [`CommandError`]. The dispatcher
//! logs the error and prints a generic failure line, so the variants exist
//! for diagnostics and tests rather than for the end user.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A required positional argument was not supplied.
    #[error("{command}: missing {operand} operand")]
    MissingOperand {
        command: &'static str,
        operand: &'static str,
    },

    /// Navigation target exists but is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Source and destination resolve to the same path.
    #[error("source and destination are the same file: {}", .0.display())]
    SameFile(PathBuf),

    /// Underlying filesystem, hashing or codec failure.
    #[error("{op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CommandError {
    /// Build a closure that wraps an `io::Error` for `op` on `path`.
    ///
    /// Meant for `map_err`:
    /// `fs::remove_file(&p).map_err(CommandError::io("remove", &p))?`
    pub fn io(op: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { op, path, source }
    }

    /// The underlying I/O error kind, if any.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}
