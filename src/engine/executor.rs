/*!
 * File Engine Executor
 * Shared state, construction, and helpers used by every operation
 */

use std::fmt;
use std::io;
use std::str::FromStr;
use std::sync::Arc;

use crate::core::PathLocks;
use crate::monitoring::{span_operation, OperationSpan};
use crate::security::{ResolvedPath, SandboxRoot};
use crate::vfs::{FileEntry, FileIo, FsError, FsResult, LocalIo, Stat};

/// What a move does when the atomic rename crosses a filesystem boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossDevicePolicy {
    /// Copy then delete the source; not atomic, logged as such
    #[default]
    CopyThenDelete,
    /// Fail with `IoFailure` instead of degrading
    Reject,
}

impl FromStr for CrossDevicePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "copy" | "copy_then_delete" => Ok(CrossDevicePolicy::CopyThenDelete),
            "reject" => Ok(CrossDevicePolicy::Reject),
            other => Err(format!("expected `copy` or `reject`, got `{}`", other)),
        }
    }
}

impl fmt::Display for CrossDevicePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrossDevicePolicy::CopyThenDelete => write!(f, "copy"),
            CrossDevicePolicy::Reject => write!(f, "reject"),
        }
    }
}

/// Path-scoped file operation engine
///
/// Every call runs `validate -> resolve -> (lock) -> execute -> assemble`
/// with no state kept between calls. Cloning is cheap; clones share the
/// raw adapter and the lock registry.
#[derive(Clone)]
pub struct FileEngine {
    pub(super) root: Arc<SandboxRoot>,
    pub(super) io: Arc<dyn FileIo>,
    pub(super) locks: Arc<PathLocks>,
    pub(super) cross_device: CrossDevicePolicy,
}

impl fmt::Debug for FileEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileEngine")
            .field("root", &self.root.as_path())
            .field("cross_device", &self.cross_device)
            .field("locked_paths", &self.locks.len())
            .finish()
    }
}

/// Builder for `FileEngine` with injectable collaborators
pub struct FileEngineBuilder {
    root: SandboxRoot,
    io: Option<Arc<dyn FileIo>>,
    locks: Option<Arc<PathLocks>>,
    cross_device: CrossDevicePolicy,
}

impl FileEngineBuilder {
    /// Use a custom raw adapter (defaults to the host filesystem)
    pub fn with_io(mut self, io: Arc<dyn FileIo>) -> Self {
        self.io = Some(io);
        self
    }

    /// Share an existing lock registry
    pub fn with_locks(mut self, locks: Arc<PathLocks>) -> Self {
        self.locks = Some(locks);
        self
    }

    pub fn with_cross_device_policy(mut self, policy: CrossDevicePolicy) -> Self {
        self.cross_device = policy;
        self
    }

    pub fn build(self) -> FileEngine {
        FileEngine {
            root: Arc::new(self.root),
            io: self.io.unwrap_or_else(|| Arc::new(LocalIo::new())),
            locks: self.locks.unwrap_or_default(),
            cross_device: self.cross_device,
        }
    }
}

impl FileEngine {
    /// Engine over the host filesystem with default policies
    pub fn new(root: SandboxRoot) -> Self {
        Self::builder(root).build()
    }

    pub fn builder(root: SandboxRoot) -> FileEngineBuilder {
        FileEngineBuilder {
            root,
            io: None,
            locks: None,
            cross_device: CrossDevicePolicy::default(),
        }
    }

    pub fn root(&self) -> &SandboxRoot {
        &self.root
    }

    /// Registry used for append sections
    pub fn locks(&self) -> &PathLocks {
        &self.locks
    }

    pub fn cross_device_policy(&self) -> CrossDevicePolicy {
        self.cross_device
    }

    /// Run one operation inside its tracing span and record the outcome
    pub(super) fn traced<T, F>(&self, operation: &'static str, path: &str, f: F) -> FsResult<T>
    where
        F: FnOnce(&OperationSpan) -> FsResult<T>,
    {
        let span = span_operation(operation, path);
        let _entered = span.enter();
        let result = f(&span);
        span.record_outcome(&result);
        result
    }

    /// Resolve a path that may name the root (read-only listing operations)
    pub(super) fn resolve_any(&self, raw: &str) -> FsResult<ResolvedPath> {
        self.root.resolve(Some(raw))
    }

    /// Resolve a path that must be non-blank
    pub(super) fn resolve_target(&self, operation: &str, raw: &str) -> FsResult<ResolvedPath> {
        if raw.trim().is_empty() {
            return Err(FsError::InvalidPath(format!(
                "{}: path must not be empty",
                operation
            )));
        }
        self.root.resolve(Some(raw))
    }

    /// Resolve a path that must be non-blank and below the root
    pub(super) fn resolve_mutable(&self, operation: &str, raw: &str) -> FsResult<ResolvedPath> {
        let target = self.resolve_target(operation, raw)?;
        if target.is_root() {
            return Err(FsError::InvalidPath(format!(
                "{}: cannot modify sandbox root: {}",
                operation, raw
            )));
        }
        Ok(target)
    }

    /// Stat an existing target, mapping absence to `NotFound`
    pub(super) fn stat_existing(
        &self,
        operation: &str,
        target: &ResolvedPath,
        raw: &str,
    ) -> FsResult<Stat> {
        self.io
            .stat(target.as_path())
            .map_err(|e| FsError::from_io(e, format!("{} {}", operation, raw)))
    }

    /// Stat a path that may legitimately be absent
    pub(super) fn stat_optional(
        &self,
        operation: &str,
        target: &ResolvedPath,
        raw: &str,
    ) -> FsResult<Option<Stat>> {
        match self.io.stat(target.as_path()) {
            Ok(stat) => Ok(Some(stat)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FsError::io_failure(e, format!("{} {}", operation, raw))),
        }
    }

    /// Create the parent directories of `target`
    pub(super) fn ensure_parent(
        &self,
        operation: &str,
        target: &ResolvedPath,
        raw: &str,
    ) -> FsResult<()> {
        match target.parent() {
            Some(parent) => self.io.create_dir_all(parent).map_err(|e| {
                FsError::io_failure(e, format!("{}: create parent dirs for {}", operation, raw))
            }),
            None => Ok(()),
        }
    }

    pub(super) fn entry_for(target: &ResolvedPath, stat: &Stat) -> FileEntry {
        FileEntry::new(target.file_name(), target.relative(), stat)
    }
}
