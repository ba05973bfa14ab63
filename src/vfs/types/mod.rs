/*!
 * VFS Types
 * Shared types for file operations with serde support
 */

mod entry;
mod errors;
mod file_type;
mod metadata;

pub use entry::FileEntry;
pub use errors::{FsError, FsResult};
pub use file_type::FileKind;
pub use metadata::Stat;
