use std::{io, path::PathBuf};

use thiserror::Error;

// Windows system error codes for a file held open by another process.
const ERROR_SHARING_VIOLATION: i32 = 32;
const ERROR_LOCK_VIOLATION: i32 = 33;

/// How a failed removal attempt is handled by the retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Nothing to delete, counts as success.
    AlreadyAbsent,
    /// Recoverable once by clearing read-only attributes.
    AccessDenied,
    /// Transient, retried after a pause.
    InUse,
    /// Not recovered, returned to the caller.
    Unclassified,
}

impl ErrorClass {
    pub fn of(error: &io::Error) -> Self {
        if cfg!(windows)
            && matches!(
                error.raw_os_error(),
                Some(ERROR_SHARING_VIOLATION) | Some(ERROR_LOCK_VIOLATION)
            )
        {
            return ErrorClass::InUse;
        }
        match error.kind() {
            io::ErrorKind::NotFound => ErrorClass::AlreadyAbsent,
            io::ErrorKind::PermissionDenied => ErrorClass::AccessDenied,
            // DirectoryNotEmpty: another process added an entry while the tree was removed
            io::ErrorKind::ResourceBusy
            | io::ErrorKind::ExecutableFileBusy
            | io::ErrorKind::DirectoryNotEmpty => ErrorClass::InUse,
            _ => ErrorClass::Unclassified,
        }
    }
}

#[derive(Error, Debug)]
pub enum DeleteError {
    #[error("Failed to delete {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to clear read-only attribute under {path}: {source}")]
    ClearReadOnly {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let class_of = |kind: io::ErrorKind| ErrorClass::of(&io::Error::from(kind));

        assert_eq!(class_of(io::ErrorKind::NotFound), ErrorClass::AlreadyAbsent);
        assert_eq!(
            class_of(io::ErrorKind::PermissionDenied),
            ErrorClass::AccessDenied
        );
        assert_eq!(class_of(io::ErrorKind::ResourceBusy), ErrorClass::InUse);
        assert_eq!(class_of(io::ErrorKind::DirectoryNotEmpty), ErrorClass::InUse);
        assert_eq!(class_of(io::ErrorKind::InvalidInput), ErrorClass::Unclassified);
        assert_eq!(
            ErrorClass::of(&io::Error::other("disk on fire")),
            ErrorClass::Unclassified
        );
    }

    #[cfg(windows)]
    #[test]
    fn test_sharing_violation_is_in_use() {
        let error = io::Error::from_raw_os_error(ERROR_SHARING_VIOLATION);
        assert_eq!(ErrorClass::of(&error), ErrorClass::InUse);
    }
}
