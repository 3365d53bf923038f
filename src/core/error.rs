//! Defines the error type for the `core` module.

use std::path::PathBuf;
use thiserror::Error;

use super::WalkSummary;

/// Terminal outcomes of a directory walk other than successful completion.
///
/// Per-directory listing failures (permission denied, transient I/O errors)
/// are absorbed inside the walker and never surface here; only an invalid
/// root or a cancellation aborts a walk as a whole.
#[derive(Debug, Error)]
pub enum WalkError {
    /// The root path does not exist or is not a directory. No nodes were
    /// emitted and no counts were accumulated.
    #[error("Path is not a valid directory: {0}")]
    PathNotFound(PathBuf),

    /// The walk was cancelled cooperatively. Nodes emitted before the
    /// cancellation remain valid; `partial` holds the counts at that point.
    #[error("Walk was cancelled by the user")]
    Cancelled { partial: WalkSummary },

    /// The search pattern could not be compiled into a glob.
    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] globset::Error),
}
