/*!
 * Two-Path Operations
 * move and copy with directory-aware destination policies
 */

use std::io;

use tracing::{info, warn};

use super::executor::{CrossDevicePolicy, FileEngine};
use crate::security::ResolvedPath;
use crate::vfs::{FsError, FsResult, Stat};

/// True if a rename failed because source and destination are on different filesystems
#[cfg(unix)]
fn is_cross_device(e: &io::Error) -> bool {
    e.raw_os_error() == Some(nix::errno::Errno::EXDEV as i32)
}

#[cfg(not(unix))]
fn is_cross_device(_e: &io::Error) -> bool {
    false
}

impl FileEngine {
    /// Move a file or directory
    ///
    /// An existing destination file is overwritten and an existing empty
    /// directory is replaced; a non-empty destination directory is refused.
    /// Uses an atomic rename where the filesystem allows it.
    pub fn move_entry(&self, source: &str, destination: &str) -> FsResult<()> {
        self.traced("move", source, |span| {
            span.record_destination(destination);
            let (from, from_stat, to, to_stat) = self.prepare_transfer("move", source, destination)?;

            if from == to {
                return Ok(());
            }

            self.ensure_parent("move", &to, destination)?;
            if let Some(existing) = to_stat {
                // rename(2) cannot swap a file and a directory
                if existing.is_dir() != from_stat.is_dir() {
                    self.io.remove_tree(to.as_path()).map_err(|e| {
                        FsError::io_failure(e, format!("move: replace {}", destination))
                    })?;
                }
            }

            match self.io.rename(from.as_path(), to.as_path()) {
                Ok(()) => {}
                Err(e) if is_cross_device(&e) => {
                    self.move_across_devices(&from, &from_stat, &to, source, destination)?
                }
                Err(e) => {
                    return Err(FsError::from_io(
                        e,
                        format!("move {} to {}", source, destination),
                    ))
                }
            }

            info!(source, destination, "moved");
            Ok(())
        })
    }

    /// Copy a file, or mirror a directory subtree
    ///
    /// An existing destination file is overwritten; a non-empty destination
    /// directory is refused. A failure part-way through a directory copy
    /// leaves whatever was already copied in place.
    pub fn copy_entry(&self, source: &str, destination: &str) -> FsResult<()> {
        self.traced("copy", source, |span| {
            span.record_destination(destination);
            let (from, from_stat, to, to_stat) = self.prepare_transfer("copy", source, destination)?;

            if from == to {
                return Err(FsError::InvalidPath(format!(
                    "copy: source and destination are the same: {}",
                    source
                )));
            }

            self.ensure_parent("copy", &to, destination)?;

            if from_stat.is_dir() {
                if matches!(to_stat, Some(existing) if !existing.is_dir()) {
                    return Err(FsError::AlreadyExists(format!(
                        "cannot copy directory over file: {}",
                        destination
                    )));
                }
                self.io
                    .copy_tree(from.as_path(), to.as_path())
                    .map_err(|e| {
                        FsError::io_failure(e, format!("copy {} to {}", source, destination))
                    })?;
            } else {
                if matches!(to_stat, Some(existing) if existing.is_dir()) {
                    // Known empty at this point
                    self.io.remove_dir(to.as_path()).map_err(|e| {
                        FsError::io_failure(e, format!("copy: replace {}", destination))
                    })?;
                }
                self.io
                    .copy_file(from.as_path(), to.as_path())
                    .map_err(|e| {
                        FsError::from_io(e, format!("copy {} to {}", source, destination))
                    })?;
            }

            info!(source, destination, directory = from_stat.is_dir(), "copied");
            Ok(())
        })
    }

    /// Shared pre-checks for move and copy
    ///
    /// Nothing is modified unless every check passes.
    fn prepare_transfer(
        &self,
        operation: &str,
        source: &str,
        destination: &str,
    ) -> FsResult<(ResolvedPath, Stat, ResolvedPath, Option<Stat>)> {
        let from = self.resolve_mutable(operation, source)?;
        let to = self.resolve_mutable(operation, destination)?;

        let from_stat = self.stat_existing(operation, &from, source)?;

        if from.contains(&to) {
            return Err(FsError::InvalidPath(format!(
                "{}: destination {} is inside source {}",
                operation, destination, source
            )));
        }

        let to_stat = self.stat_optional(operation, &to, destination)?;
        if let Some(existing) = to_stat {
            if existing.is_dir() && from != to {
                let empty = self.io.is_empty_dir(to.as_path()).map_err(|e| {
                    FsError::io_failure(e, format!("{} {}", operation, destination))
                })?;
                if !empty {
                    return Err(FsError::AlreadyExists(format!(
                        "destination directory is not empty: {}",
                        destination
                    )));
                }
            }
        }

        Ok((from, from_stat, to, to_stat))
    }

    /// Degrade a rename into copy + delete
    fn move_across_devices(
        &self,
        from: &ResolvedPath,
        from_stat: &Stat,
        to: &ResolvedPath,
        source: &str,
        destination: &str,
    ) -> FsResult<()> {
        let context = format!("move {} to {}", source, destination);

        if self.cross_device == CrossDevicePolicy::Reject {
            return Err(FsError::IoFailure(format!(
                "{}: source and destination are on different filesystems",
                context
            )));
        }

        warn!(
            source,
            destination,
            non_atomic = true,
            "rename crosses filesystems, falling back to copy and delete"
        );

        let copied = if from_stat.is_dir() {
            self.io.copy_tree(from.as_path(), to.as_path())
        } else {
            self.io.copy_file(from.as_path(), to.as_path())
        };
        copied.map_err(|e| FsError::io_failure(e, context.clone()))?;

        self.io
            .remove_tree(from.as_path())
            .map_err(|e| FsError::io_failure(e, format!("{}: remove source", context)))
    }
}
