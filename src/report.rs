use std::fmt::Display;
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use console::style;

use crate::utils::{format_permissions, format_size, type_char};
use crate::{DuplicateRegistry, FileEntry, WalkConfig, WalkWarning};

/// Repeated once per depth level before the branch connector
pub const INDENT_MARKER: &str = "│   ";
pub const BRANCH_PREFIX: &str = "├── ";

/// Whether diagnostics on stderr should be colored
pub fn stderr_color(no_color: bool) -> bool {
    !no_color && console::colors_enabled_stderr()
}

/// Renders tree lines and the final report to `out`, diagnostics to `err`.
///
/// Names and paths are written as raw bytes, never lossily converted.
pub struct ReportPrinter<O: Write, E: Write> {
    out: O,
    err: E,
    color: bool,
}

impl ReportPrinter<io::Stdout, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> ReportPrinter<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self {
            out,
            err,
            color: false,
        }
    }

    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    pub fn header(&mut self, root: &Path) -> io::Result<()> {
        self.out.write_all(root.as_os_str().as_bytes())?;
        writeln!(self.out)
    }

    /// One tree line: indent, connector, `(kind) name` and the enabled columns
    pub fn entry(&mut self, entry: &FileEntry, depth: usize, config: &WalkConfig) -> io::Result<()> {
        let mut line = render_tree_line(entry, depth, config);
        line.push(b'\n');
        self.out.write_all(&line)
    }

    pub fn warning(&mut self, warning: &WalkWarning) -> io::Result<()> {
        if warning.is_directory_level() {
            self.diagnostic(warning, Tone::Error)
        } else {
            self.diagnostic(warning, Tone::Warning)
        }
    }

    /// Free-form diagnostic, e.g. the hashing fallback notice
    pub fn notice(&mut self, text: &str) -> io::Result<()> {
        self.diagnostic(text, Tone::Warning)
    }

    /// Error that ends the run
    pub fn fatal(&mut self, err: &anyhow::Error) -> io::Result<()> {
        self.diagnostic(format!("Error: {:#}", err), Tone::Error)
    }

    fn diagnostic(&mut self, text: impl Display, tone: Tone) -> io::Result<()> {
        if !self.color {
            return writeln!(self.err, "{}", text);
        }
        let styled = style(text).for_stderr();
        match tone {
            Tone::Error => writeln!(self.err, "{}", styled.red()),
            Tone::Warning => writeln!(self.err, "{}", styled.yellow()),
        }
    }

    pub fn duplicate_report(&mut self, registry: &DuplicateRegistry, total_files: usize) -> io::Result<()> {
        let report = registry.report();

        writeln!(self.out)?;
        writeln!(self.out, "Duplicate files found (by inode):")?;
        for group in &report.groups {
            writeln!(self.out, "[{}]", group.key)?;
            for path in &group.paths {
                self.out.write_all(BRANCH_PREFIX.as_bytes())?;
                self.out.write_all(path.as_os_str().as_bytes())?;
                writeln!(self.out)?;
            }
        }

        self.summary(total_files)?;
        let groups = report.group_count();
        writeln!(
            self.out,
            "Duplicate files: {} ({} group{})",
            report.duplicate_files,
            groups,
            if groups == 1 { "" } else { "s" }
        )
    }

    pub fn summary(&mut self, total_files: usize) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Total files: {}", total_files)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()?;
        self.err.flush()
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

#[derive(Clone, Copy)]
enum Tone {
    Error,
    Warning,
}

/// Format: `<indent><branch>(<kind>) <name>[ [size]][ [perms]][ [inode: n]]`
pub fn render_tree_line(entry: &FileEntry, depth: usize, config: &WalkConfig) -> Vec<u8> {
    let mut line = INDENT_MARKER.repeat(depth).into_bytes();
    line.extend_from_slice(BRANCH_PREFIX.as_bytes());
    line.extend_from_slice(format!("({}) ", type_char(entry.kind)).as_bytes());
    line.extend_from_slice(entry.name.as_bytes());

    let mut columns = String::new();
    if config.show_size && !entry.is_dir() {
        columns.push_str(&format!(" [{}]", format_size(entry.size)));
    }
    if config.show_permissions {
        columns.push_str(&format!(" [{}]", format_permissions(entry.mode, entry.kind)));
    }
    if config.show_inode {
        columns.push_str(&format!(" [inode: {}]", entry.inode));
    }
    line.extend_from_slice(columns.as_bytes());

    line
}
