use std::path::{Path, PathBuf};

use crate::FailureReason;

/// Non-fatal warnings reported while deleting a directory tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteWarning {
    AccessDeniedForDeletion { path: PathBuf },
    DirectoryInUse { path: PathBuf },
}

impl DeleteWarning {
    pub fn for_reason(reason: FailureReason, path: &Path) -> Self {
        let path = path.to_path_buf();
        match reason {
            FailureReason::PermissionDenied => DeleteWarning::AccessDeniedForDeletion { path },
            FailureReason::InUse => DeleteWarning::DirectoryInUse { path },
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            DeleteWarning::AccessDeniedForDeletion { path }
            | DeleteWarning::DirectoryInUse { path } => path,
        }
    }

    pub fn reason(&self) -> FailureReason {
        match self {
            DeleteWarning::AccessDeniedForDeletion { .. } => FailureReason::PermissionDenied,
            DeleteWarning::DirectoryInUse { .. } => FailureReason::InUse,
        }
    }
}

impl std::fmt::Display for DeleteWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteWarning::AccessDeniedForDeletion { path } => write!(
                f,
                "Access to the path '{}' is denied, it could not be deleted.",
                path.display()
            ),
            DeleteWarning::DirectoryInUse { path } => write!(
                f,
                "The directory '{}' is in use by another process and could not be deleted.",
                path.display()
            ),
        }
    }
}
