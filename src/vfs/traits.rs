/*!
 * VFS Traits
 * Raw I/O capability the file engine depends on
 */

use std::io;
use std::path::{Path, PathBuf};

use super::types::Stat;

/// Stateless wrapper over primitive filesystem calls
///
/// Implementations receive already-resolved absolute paths and carry no
/// business rules: containment, existence policies and locking belong to the
/// engine. Errors are returned raw so the engine can attach caller context.
#[cfg_attr(test, mockall::automock)]
pub trait FileIo: Send + Sync {
    /// Check if file/directory exists (follows symlinks)
    fn exists(&self, path: &Path) -> bool;

    /// Live metadata, following symlinks
    fn stat(&self, path: &Path) -> io::Result<Stat>;

    /// Absolute paths of the direct children, in no particular order
    fn list(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// True if the directory has no children
    fn is_empty_dir(&self, path: &Path) -> io::Result<bool>;

    /// Create an empty file, failing if anything exists at `path`
    fn create_file(&self, path: &Path) -> io::Result<()>;

    /// Create a single directory, failing if anything exists at `path`
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Create directory including missing ancestors
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Read at most `length` bytes starting at `offset`
    ///
    /// Returns an empty buffer when `offset` is at or past end-of-file.
    fn read_range(&self, path: &Path, offset: u64, length: u32) -> io::Result<Vec<u8>>;

    /// Append data to the end of an existing file
    fn append(&self, path: &Path, data: &[u8]) -> io::Result<()>;

    /// Unlink a single file or symlink
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Remove an empty directory
    fn remove_dir(&self, path: &Path) -> io::Result<()>;

    /// Remove a file, or a directory and every descendant (children first)
    fn remove_tree(&self, path: &Path) -> io::Result<()>;

    /// Copy file contents, overwriting an existing destination file
    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Mirror a directory subtree into `to` (parents before children)
    fn copy_tree(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Atomic rename where the filesystem supports it
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}
