pub mod error;
pub mod registry;
pub mod report;
pub mod utils;
pub mod walker;

use std::ffi::OsString;
use std::fmt;
use std::fs::{FileType, Metadata};
use std::os::unix::fs::MetadataExt;
use std::path::PathBuf;

pub use error::WalkWarning;
pub use registry::{DuplicateGroup, DuplicateRegistry, DuplicateReport};
pub use report::ReportPrinter;
pub use walker::{RunState, WalkConfig, Walker};

/// Kind of a directory entry, as seen without following symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Directory,
    Regular,
    Symlink,
    Other,
}

impl From<FileType> for FileKind {
    fn from(file_type: FileType) -> Self {
        if file_type.is_dir() {
            FileKind::Directory
        } else if file_type.is_symlink() {
            FileKind::Symlink
        } else if file_type.is_file() {
            FileKind::Regular
        } else {
            FileKind::Other
        }
    }
}

/// One inspected directory entry with the metadata used for display and grouping
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Raw file name, printed byte for byte
    pub name: OsString,
    pub path: PathBuf,
    pub kind: FileKind,
    pub size: u64,
    pub mode: u32,
    pub uid: u32,
    pub gid: u32,
    pub inode: u64,
}

impl FileEntry {
    /// Build an entry from link-aware (lstat) metadata
    pub fn from_metadata(name: OsString, path: PathBuf, metadata: &Metadata) -> Self {
        Self {
            name,
            path,
            kind: metadata.file_type().into(),
            size: metadata.len(),
            mode: metadata.mode(),
            uid: metadata.uid(),
            gid: metadata.gid(),
            inode: metadata.ino(),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Directory
    }

    pub fn is_regular(&self) -> bool {
        self.kind == FileKind::Regular
    }
}

/// Key used to decide that two regular files are the same file.
///
/// Only inode identity exists today. A content-hash variant slots in here
/// without any change to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FileIdentity {
    Inode(u64),
}

impl FileIdentity {
    pub fn of(entry: &FileEntry, strategy: IdentityStrategy) -> Self {
        match strategy.effective() {
            IdentityStrategy::Inode | IdentityStrategy::ContentHash => {
                FileIdentity::Inode(entry.inode)
            }
        }
    }
}

impl fmt::Display for FileIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileIdentity::Inode(ino) => write!(f, "inode: {}", ino),
        }
    }
}

/// How duplicate keys are derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityStrategy {
    /// Group files sharing an inode (hard links)
    #[default]
    Inode,
    /// Group files by content hash (not implemented, falls back to inode)
    ContentHash,
}

impl IdentityStrategy {
    /// The strategy actually used to build keys
    pub fn effective(self) -> Self {
        match self {
            IdentityStrategy::ContentHash => IdentityStrategy::Inode,
            other => other,
        }
    }
}
