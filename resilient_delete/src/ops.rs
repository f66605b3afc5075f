//! File system primitives used by the deleter.
//!
//! `StdFileSystemOps` goes to the real file system, `mock::MockFileSystemOps`
//! simulates trees and failures in tests.

use std::io;
use std::path::{Path, PathBuf};

use utils::file_util;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    /// Symbolic links and other special entries, never followed.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleDirEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// Trait for file system operations to enable testing
pub trait FileSystemOps: Send + Sync {
    /// Remove a directory and everything beneath it
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Clear the read-only attribute of a file, returns true if it was set
    fn clear_read_only(&self, path: &Path) -> io::Result<bool>;

    // For easier mocking we use our own SimpleDirEntry instead of std::fs::DirEntry and return
    // boxed iterator to avoid associated type complications.
    fn read_dir(
        &self,
        path: &Path,
    ) -> io::Result<Box<dyn Iterator<Item = io::Result<SimpleDirEntry>>>>;
}

/// Production implementation using std::fs
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystemOps;

impl FileSystemOps for StdFileSystemOps {
    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_dir_all(path)
    }

    fn clear_read_only(&self, path: &Path) -> io::Result<bool> {
        file_util::clear_read_only(path)
    }

    fn read_dir(
        &self,
        path: &Path,
    ) -> io::Result<Box<dyn Iterator<Item = io::Result<SimpleDirEntry>>>> {
        let iter = std::fs::read_dir(path)?;
        Ok(Box::new(iter.map(|res| {
            let entry = res?;
            // file_type() does not follow symbolic links
            let file_type = entry.file_type()?;
            let kind = if file_type.is_dir() {
                EntryKind::Directory
            } else if file_type.is_file() {
                EntryKind::File
            } else {
                EntryKind::Other
            };
            Ok(SimpleDirEntry {
                path: entry.path(),
                kind,
            })
        })))
    }
}
