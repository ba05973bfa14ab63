/*!
 * Single-Path Mutations
 * create, delete, append
 */

use tracing::info;

use super::executor::FileEngine;
use crate::vfs::{FsError, FsResult};

impl FileEngine {
    /// Create an empty file or a directory
    ///
    /// Missing ancestors are created first. Fails if anything already
    /// exists at `path`.
    pub fn create(&self, path: &str, is_directory: bool) -> FsResult<()> {
        self.traced("create", path, |_| {
            let target = self.resolve_mutable("create", path)?;
            if self.io.exists(target.as_path()) {
                return Err(FsError::AlreadyExists(path.to_string()));
            }

            self.ensure_parent("create", &target, path)?;
            let created = if is_directory {
                self.io.create_dir(target.as_path())
            } else {
                self.io.create_file(target.as_path())
            };
            // A concurrent creator may win between the check and the call
            created.map_err(|e| FsError::from_io(e, format!("create {}", path)))?;

            info!(path, is_directory, "created");
            Ok(())
        })
    }

    /// Delete a file, or a directory with every descendant
    pub fn delete(&self, path: &str) -> FsResult<()> {
        self.traced("delete", path, |_| {
            let target = self.resolve_mutable("delete", path)?;
            let stat = self.stat_existing("delete", &target, path)?;

            if stat.is_dir() {
                self.io
                    .remove_tree(target.as_path())
                    .map_err(|e| FsError::io_failure(e, format!("delete {}", path)))?;
            } else {
                self.io
                    .remove_file(target.as_path())
                    .map_err(|e| FsError::from_io(e, format!("delete {}", path)))?;
            }

            info!(path, directory = stat.is_dir(), "deleted");
            Ok(())
        })
    }

    /// Append text to the end of an existing file
    ///
    /// Concurrent appends to the same path are serialized through the
    /// per-path exclusive section; appends to different paths never wait on
    /// each other.
    pub fn append(&self, path: &str, data: &str) -> FsResult<()> {
        self.traced("append", path, |span| {
            let target = self.resolve_target("append", path)?;
            let stat = self.stat_existing("append", &target, path)?;
            if stat.is_dir() {
                return Err(FsError::InvalidPath(format!("is a directory: {}", path)));
            }

            self.locks
                .with_exclusive(target.as_path(), || {
                    self.io.append(target.as_path(), data.as_bytes())
                })
                .map_err(|e| FsError::from_io(e, format!("append {}", path)))?;

            span.record_items(data.len());
            Ok(())
        })
    }
}
