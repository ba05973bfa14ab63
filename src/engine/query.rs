/*!
 * Read-Only Operations
 * get-info, list-children, read
 */

use std::io;

use tracing::debug;

use super::executor::FileEngine;
use crate::vfs::{FileEntry, FsError, FsResult};

impl FileEngine {
    /// Metadata for one file or directory
    ///
    /// An empty path names the sandbox root.
    pub fn get_info(&self, path: &str) -> FsResult<FileEntry> {
        self.traced("get_info", path, |_| {
            let target = self.resolve_any(path)?;
            let stat = self.stat_existing("get_info", &target, path)?;
            Ok(Self::entry_for(&target, &stat))
        })
    }

    /// One entry per direct child, in no guaranteed order
    pub fn list_children(&self, path: &str) -> FsResult<Vec<FileEntry>> {
        self.traced("list_children", path, |span| {
            let target = self.resolve_any(path)?;
            let stat = self.stat_existing("list_children", &target, path)?;
            if !stat.is_dir() {
                return Err(FsError::InvalidPath(format!("not a directory: {}", path)));
            }

            let children = self
                .io
                .list(target.as_path())
                .map_err(|e| FsError::from_io(e, format!("list_children {}", path)))?;

            let mut entries = Vec::with_capacity(children.len());
            for child in children {
                let name = match child.file_name() {
                    Some(name) => name.to_string_lossy().into_owned(),
                    None => continue,
                };
                let relative = if target.is_root() {
                    name.clone()
                } else {
                    format!("{}/{}", target.relative(), name)
                };

                match self.io.stat(&child) {
                    Ok(child_stat) => entries.push(FileEntry::new(name, relative, &child_stat)),
                    // Removed between listing and stat
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {
                        debug!(child = %relative, "child vanished during listing");
                    }
                    Err(e) => {
                        return Err(FsError::io_failure(
                            e,
                            format!("list_children {}: stat {}", path, relative),
                        ))
                    }
                }
            }

            span.record_items(entries.len());
            Ok(entries)
        })
    }

    /// Read at most `length` bytes starting at `offset`
    ///
    /// An offset at or past end-of-file yields an empty string. Bytes are
    /// decoded as UTF-8, replacing invalid sequences.
    pub fn read(&self, path: &str, offset: u64, length: u32) -> FsResult<String> {
        self.traced("read", path, |span| {
            let target = self.resolve_target("read", path)?;
            let stat = self.stat_existing("read", &target, path)?;
            if stat.is_dir() {
                return Err(FsError::InvalidPath(format!("is a directory: {}", path)));
            }

            let bytes = self
                .io
                .read_range(target.as_path(), offset, length)
                .map_err(|e| FsError::from_io(e, format!("read {}", path)))?;

            span.record_items(bytes.len());
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        })
    }
}
