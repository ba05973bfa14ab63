/*!
 * Local Filesystem Backend
 * Wraps std::fs for host filesystem access
 */

use std::fs::{self, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::trace;

use super::traits::FileIo;
use super::types::Stat;

/// Host filesystem implementation using std::fs
///
/// Holds no state; every call goes straight to the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalIo;

impl LocalIo {
    pub fn new() -> Self {
        Self
    }
}

impl FileIo for LocalIo {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn stat(&self, path: &Path) -> io::Result<Stat> {
        let md = fs::metadata(path)?;
        Ok(Stat::from_std(&md))
    }

    fn list(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut children = Vec::new();
        for entry in fs::read_dir(path)? {
            children.push(entry?.path());
        }
        Ok(children)
    }

    fn is_empty_dir(&self, path: &Path) -> io::Result<bool> {
        Ok(fs::read_dir(path)?.next().is_none())
    }

    fn create_file(&self, path: &Path) -> io::Result<()> {
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)?;
        Ok(())
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn read_range(&self, path: &Path, offset: u64, length: u32) -> io::Result<Vec<u8>> {
        let mut file = fs::File::open(path)?;
        let len = file.metadata()?.len();

        if offset >= len || length == 0 {
            return Ok(Vec::new());
        }

        let available = (len - offset).min(u64::from(length));
        let mut buf = Vec::with_capacity(available as usize);
        file.seek(SeekFrom::Start(offset))?;
        file.take(u64::from(length)).read_to_end(&mut buf)?;
        Ok(buf)
    }

    fn append(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new().append(true).open(path)?;
        file.write_all(data)?;
        file.flush()
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path)
    }

    fn remove_tree(&self, path: &Path) -> io::Result<()> {
        // Symlinks are unlinked, never followed
        if !fs::symlink_metadata(path)?.is_dir() {
            return fs::remove_file(path);
        }

        // (dir, children already scheduled)
        let mut stack: Vec<(PathBuf, bool)> = vec![(path.to_path_buf(), false)];
        while let Some((dir, expanded)) = stack.pop() {
            if expanded {
                trace!(path = %dir.display(), "removing directory");
                fs::remove_dir(&dir)?;
                continue;
            }

            stack.push((dir.clone(), true));
            for entry in fs::read_dir(&dir)? {
                let entry = entry?;
                if entry.file_type()?.is_dir() {
                    stack.push((entry.path(), false));
                } else {
                    fs::remove_file(entry.path())?;
                }
            }
        }
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::copy(from, to)?;
        Ok(())
    }

    fn copy_tree(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::create_dir_all(to)?;

        let mut stack: Vec<(PathBuf, PathBuf)> = vec![(from.to_path_buf(), to.to_path_buf())];
        while let Some((src_dir, dst_dir)) = stack.pop() {
            for entry in fs::read_dir(&src_dir)? {
                let entry = entry?;
                let target = dst_dir.join(entry.file_name());
                if entry.file_type()?.is_dir() {
                    fs::create_dir_all(&target)?;
                    stack.push((entry.path(), target));
                } else {
                    trace!(from = %entry.path().display(), to = %target.display(), "copying file");
                    fs::copy(entry.path(), &target)?;
                }
            }
        }
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }
}
