use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info, trace};
use walkdir::WalkDir;

use crate::utils::format_total_bytes;
use crate::{
    DuplicateRegistry, FileEntry, FileIdentity, IdentityStrategy, ReportPrinter, WalkWarning,
};

/// Longest joined path the walker will inspect, in bytes
pub const DEFAULT_MAX_PATH_LEN: usize = 4096;

/// Display and grouping options for a walk
#[derive(Debug, Clone)]
pub struct WalkConfig {
    pub show_inode: bool,
    pub show_permissions: bool,
    pub show_size: bool,
    pub detect_duplicates: bool,
    pub identity: IdentityStrategy,
    pub max_path_len: usize,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            show_inode: false,
            show_permissions: false,
            show_size: false,
            detect_duplicates: false,
            identity: IdentityStrategy::Inode,
            max_path_len: DEFAULT_MAX_PATH_LEN,
        }
    }
}

impl WalkConfig {
    pub fn set_show_inode(&mut self, show: bool) {
        self.show_inode = show;
    }

    pub fn set_show_permissions(&mut self, show: bool) {
        self.show_permissions = show;
    }

    pub fn set_show_size(&mut self, show: bool) {
        self.show_size = show;
    }

    pub fn set_detect_duplicates(&mut self, detect: bool) {
        self.detect_duplicates = detect;
    }

    pub fn set_identity(&mut self, identity: IdentityStrategy) {
        self.identity = identity;
    }

    pub fn set_max_path_len(&mut self, len: usize) {
        self.max_path_len = len;
    }
}

/// Everything accumulated over one walk
#[derive(Debug, Default)]
pub struct RunState {
    /// Regular files visited
    pub total_files: usize,
    /// Entries successfully inspected and printed
    pub total_entries: usize,
    /// Bytes across regular files
    pub total_bytes: u64,
    pub registry: DuplicateRegistry,
    pub warnings: Vec<WalkWarning>,
}

/// Depth-first, pre-order directory walker.
///
/// Siblings come in the order the OS lists them; nothing is sorted, so the
/// duplicate report order follows visit order.
pub struct Walker<'a> {
    config: &'a WalkConfig,
    state: RunState,
}

impl<'a> Walker<'a> {
    pub fn new(config: &'a WalkConfig) -> Self {
        Self {
            config,
            state: RunState::default(),
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn into_state(self) -> RunState {
        self.state
    }

    /// Print the tree under `root`. Filesystem problems become warnings;
    /// only failures writing the output are returned as errors.
    pub fn walk<O: Write, E: Write>(
        &mut self,
        root: &Path,
        printer: &mut ReportPrinter<O, E>,
    ) -> Result<()> {
        if let Err(source) = fs::read_dir(root) {
            return self.warn(
                printer,
                WalkWarning::OpenDir {
                    path: root.to_path_buf(),
                    source,
                },
            );
        }

        printer.header(root).context("Failed to write tree output")?;
        debug!("Walking {}", root.display());

        let mut entries = WalkDir::new(root).min_depth(1).follow_links(false).into_iter();

        while let Some(next) = entries.next() {
            let dent = match next {
                Ok(dent) => dent,
                Err(err) => {
                    let path = err.path().unwrap_or(root).to_path_buf();
                    let depth = err.depth();
                    let warning = classify_walk_error(path, depth, into_io_error(err));
                    self.warn(printer, warning)?;
                    continue;
                }
            };

            let is_dir = dent.file_type().is_dir();
            let path = dent.path();

            let len = path.as_os_str().len();
            if len > self.config.max_path_len {
                if is_dir {
                    entries.skip_current_dir();
                }
                let warning = WalkWarning::PathTooLong {
                    path: path.to_path_buf(),
                    len,
                    limit: self.config.max_path_len,
                };
                self.warn(printer, warning)?;
                continue;
            }

            let metadata = match dent.metadata() {
                Ok(metadata) => metadata,
                Err(err) => {
                    if is_dir {
                        entries.skip_current_dir();
                    }
                    let warning = WalkWarning::Metadata {
                        path: path.to_path_buf(),
                        source: into_io_error(err),
                    };
                    self.warn(printer, warning)?;
                    continue;
                }
            };

            let entry = FileEntry::from_metadata(
                dent.file_name().to_os_string(),
                path.to_path_buf(),
                &metadata,
            );

            if entry.is_dir() {
                debug!("Entering {}", entry.path.display());
            }
            trace!(
                "{} uid={} gid={} ino={}",
                entry.path.display(),
                entry.uid,
                entry.gid,
                entry.inode
            );

            printer
                .entry(&entry, dent.depth() - 1, self.config)
                .context("Failed to write tree output")?;
            self.record(entry);
        }

        info!(
            "Walk finished: {} entries, {} regular files, {}",
            self.state.total_entries,
            self.state.total_files,
            format_total_bytes(self.state.total_bytes)
        );

        Ok(())
    }

    /// Print the duplicate report, or just the file total when detection is off
    pub fn report<O: Write, E: Write>(&self, printer: &mut ReportPrinter<O, E>) -> Result<()> {
        let written = if self.config.detect_duplicates {
            printer.duplicate_report(&self.state.registry, self.state.total_files)
        } else {
            printer.summary(self.state.total_files)
        };
        written.context("Failed to write report")?;

        printer.flush().context("Failed to flush output")
    }

    fn record(&mut self, entry: FileEntry) {
        self.state.total_entries += 1;
        if !entry.is_regular() {
            return;
        }

        self.state.total_files += 1;
        self.state.total_bytes += entry.size;

        if self.config.detect_duplicates {
            let key = FileIdentity::of(&entry, self.config.identity);
            self.state.registry.register(key, entry.path);
        }
    }

    fn warn<O: Write, E: Write>(
        &mut self,
        printer: &mut ReportPrinter<O, E>,
        warning: WalkWarning,
    ) -> Result<()> {
        printer
            .warning(&warning)
            .context("Failed to write diagnostic")?;
        self.state.warnings.push(warning);
        Ok(())
    }
}

/// walkdir reports both unreadable directories and entries whose type could
/// not be determined; only the former cost a subtree.
fn classify_walk_error(path: PathBuf, depth: usize, source: io::Error) -> WalkWarning {
    let is_dir = fs::symlink_metadata(&path).is_ok_and(|m| m.is_dir());
    if depth == 0 || is_dir {
        WalkWarning::OpenDir { path, source }
    } else {
        WalkWarning::Metadata { path, source }
    }
}

fn into_io_error(err: walkdir::Error) -> io::Error {
    let text = err.to_string();
    err.into_io_error().unwrap_or_else(|| io::Error::other(text))
}
