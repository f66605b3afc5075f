//! Mock implementations for testing code that deletes directory trees.

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use core_types::DeleteWarning;

use crate::ops::{EntryKind, FileSystemOps, SimpleDirEntry};
use crate::pause::Pause;
use crate::sink::MessageSink;

/// Internal state for MockFileSystemOps.
///
/// Groups all mutable state into a single struct for simplified locking.
#[derive(Default)]
struct MockFsState {
    /// Directory -> direct children, in insertion order
    directories: BTreeMap<PathBuf, Vec<SimpleDirEntry>>,
    read_only_files: HashSet<PathBuf>,
    /// Errors returned by the next remove calls, front first
    scripted_remove_errors: VecDeque<io::ErrorKind>,
    /// Error returned by every remove call once the scripted ones are used up
    persistent_remove_error: Option<io::ErrorKind>,
    fail_clear_read_only: Option<String>,
    remove_calls: Vec<PathBuf>,
    visited_dirs: Vec<PathBuf>,
    cleared_files: Vec<PathBuf>,
}

/// Mock implementation of FileSystemOps for testing
///
/// This mock allows you to:
/// - Build a directory tree with read-only files
/// - Script removal failures (access denied, in use, ...)
/// - Verify removal attempts and which files had their read-only attribute cleared
///
/// Like on Windows, removing a tree that still contains a read-only file fails
/// with `PermissionDenied`.
#[derive(Clone, Default)]
pub struct MockFileSystemOps {
    state: Arc<Mutex<MockFsState>>,
}

impl MockFileSystemOps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory, linking it into its parent when the parent is known
    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        let mut state = self.state.lock().unwrap();
        state.directories.entry(path.clone()).or_default();
        Self::link_to_parent(&mut state, &path, EntryKind::Directory);
    }

    /// Add a file to a directory added earlier
    pub fn add_file(&self, path: impl Into<PathBuf>, read_only: bool) {
        let path = path.into();
        let mut state = self.state.lock().unwrap();
        if read_only {
            state.read_only_files.insert(path.clone());
        }
        Self::link_to_parent(&mut state, &path, EntryKind::File);
    }

    /// Make the next remove call fail with the given error kind
    pub fn fail_remove_with(&self, kind: io::ErrorKind) {
        let mut state = self.state.lock().unwrap();
        state.scripted_remove_errors.push_back(kind);
    }

    /// Make every remove call fail with the given error kind
    pub fn fail_remove_always_with(&self, kind: io::ErrorKind) {
        let mut state = self.state.lock().unwrap();
        state.persistent_remove_error = Some(kind);
    }

    /// Make clearing read-only attributes fail with an unclassified error
    pub fn fail_clear_read_only_with(&self, error: impl Into<String>) {
        let mut state = self.state.lock().unwrap();
        state.fail_clear_read_only = Some(error.into());
    }

    /// Paths passed to `remove_dir_all`, one per attempt
    pub fn remove_calls(&self) -> Vec<PathBuf> {
        self.state.lock().unwrap().remove_calls.clone()
    }

    /// Directories listed while clearing read-only attributes, in visiting order
    pub fn visited_dirs(&self) -> Vec<PathBuf> {
        self.state.lock().unwrap().visited_dirs.clone()
    }

    /// Files passed to `clear_read_only`, in visiting order
    pub fn cleared_files(&self) -> Vec<PathBuf> {
        self.state.lock().unwrap().cleared_files.clone()
    }

    pub fn exists(&self, path: &Path) -> bool {
        let state = self.state.lock().unwrap();
        state.directories.contains_key(path)
    }

    pub fn is_read_only(&self, path: &Path) -> bool {
        let state = self.state.lock().unwrap();
        state.read_only_files.contains(path)
    }

    fn link_to_parent(state: &mut MockFsState, path: &Path, kind: EntryKind) {
        if let Some(children) = path
            .parent()
            .and_then(|parent| state.directories.get_mut(parent))
        {
            children.push(SimpleDirEntry {
                path: path.to_path_buf(),
                kind,
            });
        }
    }
}

impl FileSystemOps for MockFileSystemOps {
    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state.lock().unwrap();
        state.remove_calls.push(path.to_path_buf());

        if let Some(kind) = state.scripted_remove_errors.pop_front() {
            return Err(io::Error::new(kind, format!("Mock remove failure for {}", path.display())));
        }
        if let Some(kind) = state.persistent_remove_error {
            return Err(io::Error::new(kind, format!("Mock remove failure for {}", path.display())));
        }
        if !state.directories.contains_key(path) {
            return Err(io::Error::from(io::ErrorKind::NotFound));
        }
        if state.read_only_files.iter().any(|file| file.starts_with(path)) {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }

        state.directories.retain(|dir, _| !dir.starts_with(path));
        if let Some(siblings) = path
            .parent()
            .and_then(|parent| state.directories.get_mut(parent))
        {
            siblings.retain(|entry| entry.path != path);
        }
        Ok(())
    }

    fn clear_read_only(&self, path: &Path) -> io::Result<bool> {
        let mut state = self.state.lock().unwrap();
        if let Some(error) = state.fail_clear_read_only.as_ref() {
            return Err(io::Error::other(error.clone()));
        }
        state.cleared_files.push(path.to_path_buf());
        Ok(state.read_only_files.remove(path))
    }

    fn read_dir(
        &self,
        path: &Path,
    ) -> io::Result<Box<dyn Iterator<Item = io::Result<SimpleDirEntry>>>> {
        let mut state = self.state.lock().unwrap();
        let children = state
            .directories
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;
        state.visited_dirs.push(path.to_path_buf());
        Ok(Box::new(children.into_iter().map(Ok)))
    }
}

/// Mock pause that records the requested durations instead of sleeping.
#[derive(Clone, Default)]
pub struct MockPause {
    pauses: Arc<Mutex<Vec<Duration>>>,
}

impl MockPause {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().unwrap().clone()
    }

    pub fn total_pauses(&self) -> usize {
        self.pauses.lock().unwrap().len()
    }
}

impl Pause for MockPause {
    fn pause(&self, duration: Duration) {
        self.pauses.lock().unwrap().push(duration);
    }
}

/// Sink that keeps every warning for later inspection.
#[derive(Clone, Default)]
pub struct RecordingSink {
    warnings: Arc<Mutex<Vec<DeleteWarning>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<DeleteWarning> {
        self.warnings.lock().unwrap().clone()
    }

    pub fn total_warnings(&self) -> usize {
        self.warnings.lock().unwrap().len()
    }
}

impl MessageSink for RecordingSink {
    fn warn(&self, warning: DeleteWarning) {
        self.warnings.lock().unwrap().push(warning);
    }
}
