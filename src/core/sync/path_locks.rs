/*!
 * Per-Path Lock Registry
 * Exclusive sections keyed by resolved path, reclaimed when unused
 */

use ahash::AHashMap;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One exclusive section plus the number of callers holding or waiting on it
struct Slot {
    section: Arc<Mutex<()>>,
    users: usize,
}

/// Registry of per-path mutual exclusion sections
///
/// # Lifecycle
///
/// A slot is created on first use of a path and counted per caller. The count
/// is only changed under the registry mutex, and a slot is removed under that
/// same mutex once its count drops to zero, so an acquirer can never pick up
/// a slot that is about to be discarded.
///
/// # Fairness
///
/// `parking_lot::Mutex` hands the lock over fairly under sustained
/// contention, which bounds waiting to the holders queued ahead.
///
/// # Example
///
/// ```ignore
/// let locks = PathLocks::new();
/// let result = locks.with_exclusive(path.as_path(), || io.append(path, b"data"));
/// ```
#[derive(Default)]
pub struct PathLocks {
    slots: Mutex<AHashMap<PathBuf, Slot>>,
}

/// Registration held for the duration of one `with_exclusive` call
///
/// Dropping it hands the slot back, including while unwinding.
struct Lease<'a> {
    registry: &'a PathLocks,
    key: &'a Path,
    section: Arc<Mutex<()>>,
}

impl Drop for Lease<'_> {
    fn drop(&mut self) {
        self.registry.check_in(self.key);
    }
}

impl PathLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` while holding the exclusive section for `path`
    ///
    /// `path` must already be normalized and absolute. Callers on other paths
    /// never contend. The section is released on every exit path of `action`
    /// before its result (or panic) propagates.
    pub fn with_exclusive<F, R>(&self, path: &Path, action: F) -> R
    where
        F: FnOnce() -> R,
    {
        let lease = self.check_out(path);
        let _held = lease.section.lock();
        action()
    }

    /// Number of paths with a live slot
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }

    /// Callers currently holding or waiting on `path`
    pub fn users(&self, path: &Path) -> usize {
        self.slots.lock().get(path).map_or(0, |slot| slot.users)
    }

    fn check_out<'a>(&'a self, key: &'a Path) -> Lease<'a> {
        let mut slots = self.slots.lock();
        let slot = slots.entry(key.to_path_buf()).or_insert_with(|| Slot {
            section: Arc::new(Mutex::new(())),
            users: 0,
        });
        slot.users += 1;
        Lease {
            registry: self,
            key,
            section: Arc::clone(&slot.section),
        }
    }

    fn check_in(&self, key: &Path) {
        let mut slots = self.slots.lock();
        if let Some(slot) = slots.get_mut(key) {
            slot.users -= 1;
            if slot.users == 0 {
                slots.remove(key);
            }
        }
    }
}
