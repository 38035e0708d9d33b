//! Error types shared by the navigator, planner and screenshot organizer

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShelveError {
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Already at the filesystem root: {}", .0.display())]
    NoParent(PathBuf),

    #[error("Not a file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("Destination is not an existing directory: {}", .0.display())]
    InvalidDestination(PathBuf),

    #[error("Source and destination are the same: {} is already in {}", .file.display(), .destination.display())]
    NoOpMove { file: PathBuf, destination: PathBuf },

    #[error("No files selected")]
    EmptySelection,

    #[error("Could not find a free name for {} in its destination", .0.display())]
    ConflictResolutionExhausted(PathBuf),

    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("File disappeared before it could be moved: {}", .0.display())]
    VanishedSource(PathBuf),

    #[error("Cannot create destination root {}: {source}", .path.display())]
    DestinationRootUncreatable { path: PathBuf, source: io::Error },

    #[error("Invalid screenshot pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl ShelveError {
    /// Map an I/O error on `path` to the matching domain error.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => ShelveError::VanishedSource(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => ShelveError::PermissionDenied(path.to_path_buf()),
            _ => ShelveError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// Short reason label used in summaries and JSON output
    pub fn reason(&self) -> &'static str {
        match self {
            ShelveError::NotADirectory(_) => "not a directory",
            ShelveError::NoParent(_) => "no parent",
            ShelveError::NotAFile(_) => "not a file",
            ShelveError::InvalidDestination(_) => "invalid destination",
            ShelveError::NoOpMove { .. } => "same source and destination",
            ShelveError::EmptySelection => "empty selection",
            ShelveError::ConflictResolutionExhausted(_) => "no free name",
            ShelveError::PermissionDenied(_) => "permission denied",
            ShelveError::VanishedSource(_) => "source vanished",
            ShelveError::DestinationRootUncreatable { .. } => "destination root uncreatable",
            ShelveError::InvalidPattern { .. } => "invalid pattern",
            ShelveError::Io { .. } => "i/o error",
        }
    }
}

pub type Result<T, E = ShelveError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_classifies_not_found() {
        let err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let mapped = ShelveError::from_io(Path::new("/tmp/a.png"), err);
        assert!(matches!(mapped, ShelveError::VanishedSource(_)));
        assert_eq!(mapped.reason(), "source vanished");
    }

    #[test]
    fn test_from_io_classifies_permission_denied() {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        let mapped = ShelveError::from_io(Path::new("/root/secret"), err);
        assert!(matches!(mapped, ShelveError::PermissionDenied(_)));
    }

    #[test]
    fn test_from_io_keeps_other_errors() {
        let err = io::Error::new(io::ErrorKind::Other, "disk full");
        let mapped = ShelveError::from_io(Path::new("/mnt/x"), err);
        assert!(mapped.to_string().contains("disk full"));
        assert_eq!(mapped.reason(), "i/o error");
    }
}
