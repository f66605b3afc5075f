use serde::{Deserialize, Serialize};
use strum_macros::Display;

pub mod culture;
pub mod events;

pub use culture::Culture;
pub use events::DeleteWarning;

#[derive(Debug, Clone)]
pub enum CoreTypeError {
    ConversionError(String),
}

impl std::fmt::Display for CoreTypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreTypeError::ConversionError(msg) => write!(f, "Conversion Error: {}", msg),
        }
    }
}

impl std::error::Error for CoreTypeError {}

/// Why a resilient delete gave up while the tree was still present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum FailureReason {
    #[strum(serialize = "permission denied")]
    PermissionDenied,
    #[strum(serialize = "in use")]
    InUse,
}

/// Terminal result of one resilient delete call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeleteOutcome {
    /// The tree is gone, either removed by this call or already absent.
    Success,
    PartialFailure(FailureReason),
}

impl DeleteOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DeleteOutcome::Success)
    }

    pub fn failure_reason(&self) -> Option<FailureReason> {
        match self {
            DeleteOutcome::Success => None,
            DeleteOutcome::PartialFailure(reason) => Some(*reason),
        }
    }
}

impl std::fmt::Display for DeleteOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteOutcome::Success => write!(f, "deleted"),
            DeleteOutcome::PartialFailure(reason) => write!(f, "not deleted ({})", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_outcome_success() {
        assert!(DeleteOutcome::Success.is_success());
        assert_eq!(DeleteOutcome::Success.failure_reason(), None);
        assert_eq!(DeleteOutcome::Success.to_string(), "deleted");
    }

    #[test]
    fn test_delete_outcome_partial_failure() {
        let outcome = DeleteOutcome::PartialFailure(FailureReason::InUse);
        assert!(!outcome.is_success());
        assert_eq!(outcome.failure_reason(), Some(FailureReason::InUse));
        assert_eq!(outcome.to_string(), "not deleted (in use)");
        assert_eq!(
            DeleteOutcome::PartialFailure(FailureReason::PermissionDenied).to_string(),
            "not deleted (permission denied)"
        );
    }
}
