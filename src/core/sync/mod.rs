/*!
 * Synchronization Primitives
 *
 * Narrow mutual exclusion for read-modify-write file operations:
 * - Per-path exclusive sections, never a global lock
 * - Slots reclaimed as soon as the last holder or waiter leaves
 */

mod path_locks;

pub use path_locks::PathLocks;
