use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use core_types::{DeleteOutcome, DeleteWarning, FailureReason};

use crate::error::{DeleteError, ErrorClass};
use crate::ops::{EntryKind, FileSystemOps, StdFileSystemOps};
use crate::pause::{Pause, ThreadSleep};
use crate::sink::MessageSink;

/// Removal attempts per delete call.
pub const MAX_ATTEMPTS: usize = 3;
/// Pause before retrying a tree that is in use.
pub const RETRY_DELAY: Duration = Duration::from_millis(300);

/// Result of a single removal attempt.
enum Attempt {
    Removed,
    AlreadyAbsent,
    Retryable(FailureReason),
    Fatal(io::Error),
}

/// Deletes directory trees, clearing read-only attributes and retrying
/// transient "in use" failures.
///
/// Unrecoverable access and in-use failures are reported through a
/// [`MessageSink`] and turn into `Ok(false)`; every other I/O error is returned
/// as [`DeleteError`].
pub struct ResilientDeleter {
    fs_ops: Arc<dyn FileSystemOps>,
    pause: Arc<dyn Pause>,
}

impl ResilientDeleter {
    pub fn new() -> Self {
        Self::new_with_ops(Arc::new(StdFileSystemOps), Arc::new(ThreadSleep))
    }

    pub fn new_with_ops(fs_ops: Arc<dyn FileSystemOps>, pause: Arc<dyn Pause>) -> Self {
        Self { fs_ops, pause }
    }

    /// Deletes `path` and everything beneath it.
    ///
    /// # Returns
    /// * `Ok(true)` if the tree no longer exists, including when it never did
    /// * `Ok(false)` if it could not be deleted, after exactly one warning was sent to `sink`
    ///
    /// # Errors
    /// * `DeleteError::Io` for failures that are neither access denied nor in use
    /// * `DeleteError::ClearReadOnly` if clearing read-only attributes fails
    pub fn delete(&self, path: &Path, sink: &dyn MessageSink) -> Result<bool, DeleteError> {
        Ok(self.delete_with_outcome(path, sink)?.is_success())
    }

    /// Like [`ResilientDeleter::delete`] but tells why the tree was left behind.
    pub fn delete_with_outcome(
        &self,
        path: &Path,
        sink: &dyn MessageSink,
    ) -> Result<DeleteOutcome, DeleteError> {
        let mut read_only_cleared = false;

        for attempt in 0..MAX_ATTEMPTS {
            let is_last_attempt = attempt + 1 == MAX_ATTEMPTS;
            tracing::debug!(
                "Deleting {} (attempt {}/{})",
                path.display(),
                attempt + 1,
                MAX_ATTEMPTS
            );

            match self.attempt_removal(path) {
                Attempt::Removed => {
                    tracing::debug!("Deleted {}", path.display());
                    return Ok(DeleteOutcome::Success);
                }
                Attempt::AlreadyAbsent => {
                    tracing::debug!("{} does not exist, nothing to delete", path.display());
                    return Ok(DeleteOutcome::Success);
                }
                Attempt::Retryable(FailureReason::PermissionDenied) if !read_only_cleared => {
                    let cleared = self.clear_read_only_tree(path)?;
                    read_only_cleared = true;
                    tracing::info!(
                        "Access denied deleting {}, cleared read-only attribute from {} file(s)",
                        path.display(),
                        cleared
                    );
                }
                Attempt::Retryable(FailureReason::PermissionDenied) => {
                    return Ok(give_up(path, FailureReason::PermissionDenied, sink));
                }
                Attempt::Retryable(FailureReason::InUse) if is_last_attempt => {
                    return Ok(give_up(path, FailureReason::InUse, sink));
                }
                Attempt::Retryable(FailureReason::InUse) => {
                    tracing::debug!(
                        "{} is in use, retrying in {} ms",
                        path.display(),
                        RETRY_DELAY.as_millis()
                    );
                    self.pause.pause(RETRY_DELAY);
                }
                Attempt::Fatal(source) => {
                    return Err(DeleteError::Io {
                        path: path.to_path_buf(),
                        source,
                    });
                }
            }
        }

        // Only reached when the first access denied came on the last attempt,
        // the read-only attributes are cleared but the tree is still there.
        Ok(give_up(path, FailureReason::PermissionDenied, sink))
    }

    fn attempt_removal(&self, path: &Path) -> Attempt {
        match self.fs_ops.remove_dir_all(path) {
            Ok(()) => Attempt::Removed,
            Err(error) => match ErrorClass::of(&error) {
                ErrorClass::AlreadyAbsent => Attempt::AlreadyAbsent,
                ErrorClass::AccessDenied => Attempt::Retryable(FailureReason::PermissionDenied),
                ErrorClass::InUse => Attempt::Retryable(FailureReason::InUse),
                ErrorClass::Unclassified => Attempt::Fatal(error),
            },
        }
    }

    /// Clears the read-only attribute of every file below `dir`.
    ///
    /// Subdirectories are visited before the files of a directory. Directories
    /// themselves are never modified. Returns the number of files changed.
    fn clear_read_only_tree(&self, dir: &Path) -> Result<usize, DeleteError> {
        let to_clear_error = |source: io::Error| DeleteError::ClearReadOnly {
            path: dir.to_path_buf(),
            source,
        };
        let entries = self
            .fs_ops
            .read_dir(dir)
            .map_err(to_clear_error)?
            .collect::<io::Result<Vec<_>>>()
            .map_err(to_clear_error)?;

        let mut cleared = 0;
        for entry in entries.iter().filter(|e| e.kind == EntryKind::Directory) {
            cleared += self.clear_read_only_tree(&entry.path)?;
        }
        for entry in entries.iter().filter(|e| e.kind == EntryKind::File) {
            let changed = self.fs_ops.clear_read_only(&entry.path).map_err(|source| {
                DeleteError::ClearReadOnly {
                    path: entry.path.clone(),
                    source,
                }
            })?;
            if changed {
                cleared += 1;
            }
        }
        Ok(cleared)
    }
}

impl Default for ResilientDeleter {
    fn default() -> Self {
        Self::new()
    }
}

/// Deletes `path` using the real file system, see [`ResilientDeleter::delete`].
pub fn delete_dir(path: &Path, sink: &dyn MessageSink) -> Result<bool, DeleteError> {
    ResilientDeleter::new().delete(path, sink)
}

fn give_up(path: &Path, reason: FailureReason, sink: &dyn MessageSink) -> DeleteOutcome {
    tracing::debug!("Giving up deleting {}: {}", path.display(), reason);
    sink.warn(DeleteWarning::for_reason(reason, path));
    DeleteOutcome::PartialFailure(reason)
}
