//! Error types for asset updates

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Which filesystem operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOperation {
    Delete,
    ReadManifest,
    WriteManifest,
    Hash,
}

impl std::fmt::Display for IoOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IoOperation::Delete => write!(f, "delete"),
            IoOperation::ReadManifest => write!(f, "read manifest"),
            IoOperation::WriteManifest => write!(f, "write manifest"),
            IoOperation::Hash => write!(f, "hash"),
        }
    }
}

#[derive(Debug, Error)]
pub enum UpdateError {
    /// Source or destination root was empty
    #[error("You must provide source and destination folders (empty {0} path)")]
    InvalidInput(&'static str),

    #[error("manifest not found: {}", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("manifest {} is not valid JSON: {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON, but no `images` array of objects
    #[error("manifest {} is malformed: {reason}", path.display())]
    ManifestShape { path: PathBuf, reason: String },

    #[error("no entry referencing {filename} in manifest {}", path.display())]
    ManifestEntryNotFound { path: PathBuf, filename: String },

    #[error("failed to {op} {}: {source}", path.display())]
    Io {
        op: IoOperation,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("copied file {} does not match its source", .0.display())]
    CopyVerification(PathBuf),
}

impl UpdateError {
    pub(crate) fn io(op: IoOperation, path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| UpdateError::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Errors raised by the manifest editor
    pub fn is_manifest_error(&self) -> bool {
        matches!(
            self,
            UpdateError::ManifestNotFound(_)
                | UpdateError::ManifestParse { .. }
                | UpdateError::ManifestShape { .. }
                | UpdateError::ManifestEntryNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, UpdateError>;
