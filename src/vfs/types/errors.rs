/*!
 * File Service Error Types
 * Structured, type-safe failure kinds returned by every engine operation
 */

use serde::{Deserialize, Deserializer, Serialize};
use std::io;
use thiserror::Error;

/// File operation result
///
/// # Must Use
/// Engine operations can fail and must be handled to prevent data loss
#[must_use = "file operations can fail and must be handled"]
pub type FsResult<T> = Result<T, FsError>;

/// Failure kinds surfaced to the transport collaborator
///
/// All variants carry a non-empty detail string naming the operation and the
/// caller-supplied path. Serialization uses the tagged enum pattern.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "error", content = "details")]
pub enum FsError {
    /// Malformed, empty, or root-escaping input
    #[error("Invalid path: {0}")]
    InvalidPath(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Not found: {0}")]
    NotFound(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    #[error("Already exists: {0}")]
    AlreadyExists(#[serde(deserialize_with = "deserialize_nonempty_string")] String),

    /// Underlying filesystem call failed for reasons outside the model
    #[error("I/O failure: {0}")]
    IoFailure(#[serde(deserialize_with = "deserialize_nonempty_string")] String),
}

impl FsError {
    /// Convert a single-step `io::Error` into a typed failure
    ///
    /// `context` should name the operation and the caller-supplied path,
    /// never the absolute host path.
    pub fn from_io(e: io::Error, context: impl Into<String>) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => FsError::NotFound(context.into()),
            io::ErrorKind::AlreadyExists => FsError::AlreadyExists(context.into()),
            _ => FsError::IoFailure(format!("{}: {}", context.into(), e)),
        }
    }

    /// Wrap any `io::Error` as `IoFailure`, regardless of kind
    ///
    /// Used for recursive walks where a vanished entry mid-walk is a partial
    /// failure rather than a missing target.
    pub fn io_failure(e: io::Error, context: impl Into<String>) -> Self {
        FsError::IoFailure(format!("{}: {}", context.into(), e))
    }

    /// Short machine-readable kind name
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            FsError::InvalidPath(_) => "invalid_path",
            FsError::NotFound(_) => "not_found",
            FsError::AlreadyExists(_) => "already_exists",
            FsError::IoFailure(_) => "io_failure",
        }
    }
}

/// Deserialize and validate non-empty string for error messages
pub(super) fn deserialize_nonempty_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    if s.is_empty() {
        return Err(serde::de::Error::custom("error message must not be empty"));
    }
    Ok(s)
}
