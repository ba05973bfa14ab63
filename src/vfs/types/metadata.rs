/*!
 * Stat Record
 * Minimal live metadata returned by the raw adapter
 */

use super::file_type::FileKind;
use std::fs;

/// Live metadata for one path, never cached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stat {
    pub kind: FileKind,
    /// Byte length as reported by the filesystem
    pub size: u64,
}

impl Stat {
    pub fn from_std(md: &fs::Metadata) -> Self {
        Self {
            kind: FileKind::from_std(md.file_type()),
            size: md.len(),
        }
    }

    /// Check if this is a directory
    ///
    /// # Performance
    /// Hot path - called on every pre-check in the engine
    #[inline(always)]
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Size as callers see it: zero for directories
    #[inline]
    #[must_use]
    pub const fn reported_size(&self) -> u64 {
        if self.is_dir() {
            0
        } else {
            self.size
        }
    }
}
