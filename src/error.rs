use std::io;
use std::path::PathBuf;
#[cfg(test)]
use std::path::Path;

use thiserror::Error;

/// Non-fatal problems met during a walk. The walk always continues.
#[derive(Debug, Error)]
pub enum WalkWarning {
    /// A directory could not be listed; its subtree is skipped.
    #[error("Error: cannot open directory {} ({source})", .path.display())]
    OpenDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Metadata for a single entry could not be read; the entry is skipped.
    #[error("Warning: cannot stat {} ({source})", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Warning: path too long ({len} bytes, limit {limit}): {}", .path.display())]
    PathTooLong {
        path: PathBuf,
        len: usize,
        limit: usize,
    },
}

impl WalkWarning {
    #[cfg(test)]
    pub fn path(&self) -> &Path {
        match self {
            WalkWarning::OpenDir { path, .. }
            | WalkWarning::Metadata { path, .. }
            | WalkWarning::PathTooLong { path, .. } => path,
        }
    }

    /// Whether a whole subtree was lost, as opposed to a single entry
    pub fn is_directory_level(&self) -> bool {
        matches!(self, WalkWarning::OpenDir { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_dir_message_names_path_and_cause() {
        let warning = WalkWarning::OpenDir {
            path: PathBuf::from("/tmp/locked"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        let msg = warning.to_string();
        assert!(msg.starts_with("Error: cannot open directory /tmp/locked ("));
        assert!(warning.is_directory_level());
        assert_eq!(warning.path(), Path::new("/tmp/locked"));
    }

    #[test]
    fn test_metadata_warning_is_entry_level() {
        let warning = WalkWarning::Metadata {
            path: PathBuf::from("gone.txt"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(warning.to_string().starts_with("Warning: cannot stat gone.txt"));
        assert!(!warning.is_directory_level());
    }
}
