/*!
 * Sandbox Root and Resolver
 * Maps caller-supplied relative strings onto root-contained host paths
 */

use std::fs;
use std::path::{Component, Path, PathBuf};

use super::path::ResolvedPath;
use crate::vfs::{FsError, FsResult};

/// Configured base directory outside of which no operation may act
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxRoot {
    path: PathBuf,
}

impl SandboxRoot {
    /// Validate and normalize a root directory
    ///
    /// The path must be absolute and name an existing directory.
    pub fn new<P: AsRef<Path>>(path: P) -> FsResult<Self> {
        let path = path.as_ref();
        if !path.is_absolute() {
            return Err(FsError::InvalidPath(format!(
                "sandbox root must be absolute: {}",
                path.display()
            )));
        }

        let normalized = PathBuf::from(path_clean::clean(path));
        match fs::metadata(&normalized) {
            Ok(md) if md.is_dir() => Ok(Self { path: normalized }),
            Ok(_) => Err(FsError::InvalidPath(format!(
                "sandbox root is not a directory: {}",
                normalized.display()
            ))),
            Err(e) => Err(FsError::from_io(
                e,
                format!("sandbox root {}", normalized.display()),
            )),
        }
    }

    #[inline]
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// Resolve a caller-supplied path against the root
    ///
    /// Containment is lexical: `.` and `..` are folded before the prefix
    /// check, symlinks are not consulted. An empty string resolves to the
    /// root itself.
    pub fn resolve(&self, raw: Option<&str>) -> FsResult<ResolvedPath> {
        let raw = raw.ok_or_else(|| FsError::InvalidPath("path is missing".into()))?;
        if raw.contains('\0') {
            return Err(FsError::InvalidPath(format!(
                "path contains a null byte: {:?}",
                raw
            )));
        }

        let joined = self.path.join(raw);
        let normalized = PathBuf::from(path_clean::clean(&joined));

        let relative = match normalized.strip_prefix(&self.path) {
            Ok(rel) => to_relative_string(rel),
            Err(_) => {
                return Err(FsError::InvalidPath(format!(
                    "path escapes the sandbox root: {}",
                    raw
                )))
            }
        };

        Ok(ResolvedPath::new(normalized, relative))
    }
}

/// Join normal components with `/`
fn to_relative_string(rel: &Path) -> String {
    let mut parts = Vec::with_capacity(8);
    for component in rel.components() {
        if let Component::Normal(name) = component {
            parts.push(name.to_string_lossy());
        }
    }
    parts.join("/")
}
