use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

/// File system abstraction for writing build output and testing
pub trait FileSystem {
    /// Check if a file exists
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and all of its missing parents
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Write a file, replacing any existing contents
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Write a file after creating its parent directories
    fn write_with_parents(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.create_dir_all(parent)?;
            }
        }
        self.write(path, contents)
    }
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        (**self).create_dir_all(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        (**self).write(path, contents)
    }
}

/// Real file system implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}

/// In-memory file system for testing
///
/// Records every write so callers can assert how often a file was produced.
/// Directories must exist (or be created) before a file can be written into
/// them, matching the behaviour of the real file system.
#[derive(Debug, Default)]
pub struct MockFileSystem {
    files: RefCell<HashMap<PathBuf, Vec<u8>>>,
    dirs: RefCell<HashSet<PathBuf>>,
    writes: RefCell<Vec<PathBuf>>,
    read_only: HashSet<PathBuf>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes and directory creation at or below `path`
    pub fn set_read_only(&mut self, path: impl Into<PathBuf>) {
        self.read_only.insert(path.into());
    }

    /// Contents of a written file
    pub fn read(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.borrow().get(path).cloned()
    }

    /// Number of times `path` has been written
    pub fn write_count(&self, path: &Path) -> usize {
        self.writes.borrow().iter().filter(|p| *p == path).count()
    }

    /// Total number of writes across all files
    pub fn total_writes(&self) -> usize {
        self.writes.borrow().len()
    }

    fn check_writable(&self, path: &Path) -> io::Result<()> {
        if self.read_only.iter().any(|root| path.starts_with(root)) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is read-only", path.display()),
            ));
        }
        Ok(())
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path) || self.dirs.borrow().contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.check_writable(path)?;
        let mut dirs = self.dirs.borrow_mut();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        self.check_writable(path)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !self.dirs.borrow().contains(parent) {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("{} does not exist", parent.display()),
                ));
            }
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_vec());
        self.writes.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}
