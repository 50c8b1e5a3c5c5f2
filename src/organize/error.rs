//! Error types for session organizing.
//!
//! Run-level failures are returned as [`OrganizeError`].
//! Problems limited to one group or one file are collected as [`Diagnostic`] values
//! so the run can continue with the next unit of work.

use std::fmt;
use std::path::PathBuf;

/// Errors that abort a run before any file is touched.
#[derive(Debug, thiserror::Error)]
pub enum OrganizeError {
    /// The input directory does not exist.
    #[error("directory not found: {0}")]
    NotFound(PathBuf),

    /// The input path points to a file.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// No file in the directory matched the extensions and the file pattern.
    #[error("no compatible video files found in {0}")]
    NoMatchingFiles(PathBuf),

    /// The file pattern is not a valid regex or does not have exactly two capture groups.
    #[error("invalid file pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the organize module.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Category of a recoverable problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Destination directory exists and merging was declined.
    DirectoryConflict,
    /// Renumbering still produced an existing file name.
    UnresolvableNameConflict,
    /// Creating a directory or placing a file failed.
    IoFailure,
    /// The group prefix is not usable as a file name.
    InvalidPrefix,
}

/// A group or file level problem that did not stop the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub group: String,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(group: impl Into<String>, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DirectoryConflict => "directory conflict",
            Self::UnresolvableNameConflict => "unresolvable name conflict",
            Self::IoFailure => "I/O failure",
            Self::InvalidPrefix => "invalid prefix",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.group, self.kind, self.message)
    }
}
