/*!
 * File Service Library
 * Sandboxed file operations exposed over JSON-RPC
 */

pub mod api;
pub mod config;
pub mod core;
pub mod engine;
pub mod monitoring;
pub mod security;
pub mod vfs;

// Re-exports
pub use config::{ConfigError, ServiceConfig};
pub use crate::core::PathLocks;
pub use engine::{CrossDevicePolicy, FileEngine, FileEngineBuilder};
pub use monitoring::init_tracing;
pub use security::{ResolvedPath, SandboxRoot};
pub use vfs::{FileEntry, FileIo, FileKind, FsError, FsResult, LocalIo, Stat};
