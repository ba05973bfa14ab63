/*!
 * Resolved Path Handle
 * Root-contained, normalized path computed once per call
 */

use std::fmt;
use std::path::{Path, PathBuf};

/// Absolute, normalized path guaranteed to be the sandbox root or a descendant
///
/// Only `SandboxRoot::resolve` constructs these, so holding one is proof the
/// containment check already passed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedPath {
    absolute: PathBuf,
    relative: String,
}

impl ResolvedPath {
    pub(super) fn new(absolute: PathBuf, relative: String) -> Self {
        Self { absolute, relative }
    }

    /// Absolute host path
    #[inline]
    pub fn as_path(&self) -> &Path {
        &self.absolute
    }

    /// Root-relative form, `/` separated, empty for the root itself
    #[inline]
    pub fn relative(&self) -> &str {
        &self.relative
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.relative.is_empty()
    }

    /// Last path segment (the root directory's own name for the root)
    pub fn file_name(&self) -> String {
        self.absolute
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn parent(&self) -> Option<&Path> {
        self.absolute.parent()
    }

    /// True if `other` lies strictly below this path
    pub fn contains(&self, other: &ResolvedPath) -> bool {
        other.absolute != self.absolute && other.absolute.starts_with(&self.absolute)
    }
}

impl AsRef<Path> for ResolvedPath {
    fn as_ref(&self) -> &Path {
        &self.absolute
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.relative.is_empty() {
            write!(f, "/")
        } else {
            write!(f, "{}", self.relative)
        }
    }
}
