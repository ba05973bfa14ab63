/*!
 * File Entry
 * Metadata record returned to callers for a file or directory
 */

use serde::{Deserialize, Deserializer, Serialize};

use super::metadata::Stat;

/// Metadata record built fresh per query from live filesystem state
///
/// The wire names (`path`, `size`, `directory`) follow the JSON-RPC surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileEntry {
    /// Last path segment
    #[serde(deserialize_with = "deserialize_entry_name")]
    pub name: String,
    /// Path relative to the sandbox root, `/` separated, empty for the root
    #[serde(rename = "path")]
    pub relative_path: String,
    /// Zero for directories
    #[serde(rename = "size")]
    pub size_bytes: u64,
    #[serde(rename = "directory")]
    pub is_directory: bool,
}

impl FileEntry {
    /// Build an entry from a stat record
    pub fn new(name: impl Into<String>, relative_path: impl Into<String>, stat: &Stat) -> Self {
        Self {
            name: name.into(),
            relative_path: relative_path.into(),
            size_bytes: stat.reported_size(),
            is_directory: stat.is_dir(),
        }
    }
}

/// Entry names may be empty only for a root at `/`; they never contain separators
fn deserialize_entry_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    if name.contains('\0') {
        return Err(serde::de::Error::custom(
            "entry name cannot contain null bytes",
        ));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(serde::de::Error::custom(
            "entry name cannot contain path separators",
        ));
    }
    Ok(name)
}
