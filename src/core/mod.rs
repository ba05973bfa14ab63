/*!
 * Core Module
 * Shared concurrency building blocks
 */

pub mod sync;

// Re-export for convenience
pub use sync::PathLocks;
