use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::processing::EvalError;

/// Convenience result type for table operations.
pub type TableResult<T> = Result<T, TableError>;

/// Coarse classification of a [`TableError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Loading a table from one or more files failed.
    Load,
    /// Saving a table failed.
    Save,
    /// A column reference, column length, or write-time conversion was invalid.
    Column,
    /// An arithmetic or comparison operation failed.
    Operation,
    /// Any other table invariant was violated (slice bounds, mask length, ...).
    Table,
}

/// Error type returned by every fallible table operation.
///
/// This is a single error enum shared by the data model, the operation engine, and IO.
#[derive(Debug, Error)]
pub enum TableError {
    /// A file could not be read, headers disagreed, or a snapshot could not be decoded.
    #[error("load error: {message}")]
    Load {
        /// Offending path, when the failure is tied to one file.
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// A file could not be written or the table cannot be saved.
    #[error("save error: {message}")]
    Save {
        /// Offending path, when the failure is tied to one file.
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Invalid column reference, value count mismatch, or a value that cannot be stored.
    #[error("column error: {message}")]
    Column { message: String },

    /// An arithmetic or comparison operation failed.
    #[error("operation error: {message}")]
    Operation {
        message: String,
        #[source]
        cause: Option<EvalError>,
    },

    /// Generic table invariant violation.
    #[error("table error: {message}")]
    Table { message: String },
}

impl TableError {
    /// The coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Load { .. } => ErrorKind::Load,
            Self::Save { .. } => ErrorKind::Save,
            Self::Column { .. } => ErrorKind::Column,
            Self::Operation { .. } => ErrorKind::Operation,
            Self::Table { .. } => ErrorKind::Table,
        }
    }

    /// The path the error is attached to, for load/save failures.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Load { path, .. } | Self::Save { path, .. } => path.as_deref(),
            _ => None,
        }
    }

    /// Returns `true` if the error wraps an underlying I/O failure.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Self::Load { source: Some(_), .. } | Self::Save { source: Some(_), .. }
        )
    }

    pub(crate) fn column(message: impl Into<String>) -> Self {
        Self::Column {
            message: message.into(),
        }
    }

    pub(crate) fn table(message: impl Into<String>) -> Self {
        Self::Table {
            message: message.into(),
        }
    }

    pub(crate) fn operation(message: impl Into<String>) -> Self {
        Self::Operation {
            message: message.into(),
            cause: None,
        }
    }

    pub(crate) fn load(path: Option<&Path>, message: impl Into<String>) -> Self {
        Self::Load {
            path: path.map(Path::to_path_buf),
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn load_io(path: &Path, message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Load {
            path: Some(path.to_path_buf()),
            message: format!("{}: {source}", message.into()),
            source: Some(source),
        }
    }

    pub(crate) fn save(path: Option<&Path>, message: impl Into<String>) -> Self {
        Self::Save {
            path: path.map(Path::to_path_buf),
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn save_io(path: &Path, message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Save {
            path: Some(path.to_path_buf()),
            message: format!("{}: {source}", message.into()),
            source: Some(source),
        }
    }
}
