/*!
 * File Kind Enum
 * Classifies filesystem objects as seen by the raw adapter
 */

use std::fmt;
use std::fs;

/// Kind of the object a path names, after following symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    File,
    Directory,
    /// Devices, fifos, sockets
    Other,
}

impl FileKind {
    /// Classify a `std::fs::FileType` obtained from followed metadata
    pub fn from_std(ft: fs::FileType) -> Self {
        if ft.is_dir() {
            FileKind::Directory
        } else if ft.is_file() {
            FileKind::File
        } else {
            FileKind::Other
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        matches!(self, FileKind::Directory)
    }
}

impl Default for FileKind {
    fn default() -> Self {
        Self::Other
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FileKind::File => write!(f, "file"),
            FileKind::Directory => write!(f, "directory"),
            FileKind::Other => write!(f, "other"),
        }
    }
}
