//! Error types for catalog normalization runs.

use std::path::Path;

/// Errors arising while loading, migrating or persisting catalog documents.
///
/// `DirectoryNotFound` and `ListDirectory` abort the whole run. `Read` and
/// `Write` are isolated to one file by the batch loop.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("failed to list catalog directory {path}: {message}")]
    ListDirectory { path: String, message: String },

    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to write {path}: {message}")]
    Write { path: String, message: String },
}

impl CatalogError {
    pub(crate) fn directory_not_found(path: &Path) -> Self {
        Self::DirectoryNotFound {
            path: path.display().to_string(),
        }
    }

    pub(crate) fn list_directory(path: &Path, message: impl Into<String>) -> Self {
        Self::ListDirectory {
            path: path.display().to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn read(path: &Path, message: impl Into<String>) -> Self {
        Self::Read {
            path: path.display().to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn write(path: &Path, message: impl Into<String>) -> Self {
        Self::Write {
            path: path.display().to_string(),
            message: message.into(),
        }
    }

    /// Stable tag used in machine-readable reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DirectoryNotFound { .. } => "directory_not_found",
            Self::ListDirectory { .. } => "list_directory",
            Self::Read { .. } => "read_error",
            Self::Write { .. } => "write_error",
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::DirectoryNotFound { .. } | Self::ListDirectory { .. }
        )
    }
}
