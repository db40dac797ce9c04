use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

/// Where emitted assets are written.
pub trait OutputFileSystem {
    fn create_dir_all(&mut self, path: &Path) -> io::Result<()>;
    fn write(&mut self, path: &Path, contents: &[u8]) -> io::Result<()>;
    /// Remove a directory and everything below it. Missing is not an error.
    fn remove_dir_all(&mut self, path: &Path) -> io::Result<()>;
    /// Remove a single file. Missing is not an error.
    fn remove_file(&mut self, path: &Path) -> io::Result<()>;
}

/// Keeps written files in memory, in write order.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: IndexMap<PathBuf, Vec<u8>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self, path: &Path) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }
}

impl OutputFileSystem for MemoryFileSystem {
    fn create_dir_all(&mut self, _path: &Path) -> io::Result<()> {
        Ok(())
    }

    fn write(&mut self, path: &Path, contents: &[u8]) -> io::Result<()> {
        self.files.insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    fn remove_dir_all(&mut self, path: &Path) -> io::Result<()> {
        self.files.retain(|file, _| !file.starts_with(path));
        Ok(())
    }

    fn remove_file(&mut self, path: &Path) -> io::Result<()> {
        self.files.shift_remove(path);
        Ok(())
    }
}

/// Writes to the real disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeFileSystem;

impl OutputFileSystem for NativeFileSystem {
    fn create_dir_all(&mut self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn write(&mut self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::write(path, contents)
    }

    fn remove_dir_all(&mut self, path: &Path) -> io::Result<()> {
        ignore_not_found(fs::remove_dir_all(path))
    }

    fn remove_file(&mut self, path: &Path) -> io::Result<()> {
        ignore_not_found(fs::remove_file(path))
    }
}

fn ignore_not_found(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
