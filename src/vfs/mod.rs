/*!
 * Virtual File System Module
 * Raw I/O capability and shared file types
 */

pub mod local;
pub mod traits;
pub mod types;

// Re-exports
pub use local::LocalIo;
pub use traits::FileIo;
pub use types::{FileEntry, FileKind, FsError, FsResult, Stat};
