//! Loader error types.

use std::path::PathBuf;

/// Errors that stop the whole load.
///
/// Malformed individual records are not errors at this level; they are
/// logged and skipped.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The data directory does not exist or is not a directory
    #[error("transport data folder not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Reading a directory or file failed
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No valid record anywhere under the directory
    #[error("no valid transport data found in {}", .0.display())]
    NoTransports(PathBuf),
}
