/*!
 * Sandbox Resolver
 *
 * Every caller-supplied path passes through `SandboxRoot::resolve` before any
 * filesystem access. The result is a `ResolvedPath` that is lexically
 * contained in the root.
 */

pub mod path;
pub mod root;

pub use path::ResolvedPath;
pub use root::SandboxRoot;
