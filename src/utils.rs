use humansize::{format_size as humansize_format, DECIMAL};

use crate::FileKind;

const SIZE_UNITS: [&str; 5] = ["B", "K", "M", "G", "T"];

/// Format a byte count with binary prefixes and one decimal, e.g. `1.5K`.
///
/// Division stops at `T`, so very large values may exceed 1024 there.
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;

    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{:.1}{}", value, SIZE_UNITS[unit])
}

/// Render mode bits as an `ls -l` style string, e.g. `drwxr-xr-x`
pub fn format_permissions(mode: u32, kind: FileKind) -> String {
    const BITS: [(u32, char); 9] = [
        (0o400, 'r'),
        (0o200, 'w'),
        (0o100, 'x'),
        (0o040, 'r'),
        (0o020, 'w'),
        (0o010, 'x'),
        (0o004, 'r'),
        (0o002, 'w'),
        (0o001, 'x'),
    ];

    let mut out = String::with_capacity(10);
    out.push(match kind {
        FileKind::Directory => 'd',
        FileKind::Symlink => 'l',
        FileKind::Regular | FileKind::Other => '-',
    });

    for (bit, glyph) in BITS {
        out.push(if mode & bit != 0 { glyph } else { '-' });
    }

    out
}

/// Single-letter kind shown in parentheses on each tree line
pub fn type_char(kind: FileKind) -> char {
    match kind {
        FileKind::Directory => 'd',
        FileKind::Symlink => 'l',
        FileKind::Regular | FileKind::Other => 'f',
    }
}

/// Human readable total for log output
pub fn format_total_bytes(bytes: u64) -> String {
    humansize_format(bytes, DECIMAL)
}
