/*!
 * Security Module
 * Path containment for the sandboxed subtree
 */

pub mod sandbox;

// Re-export for convenience
pub use sandbox::{ResolvedPath, SandboxRoot};
