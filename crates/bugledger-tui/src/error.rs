use bugledger_store::{FailureKind, StoreError};
use tracing::{error, warn};

/// Severity levels for error events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Warning,
    Error,
}

impl From<&StoreError> for ErrorSeverity {
    fn from(err: &StoreError) -> Self {
        match err.kind() {
            // Someone else changed the list under us; the UI re-fetches on warnings.
            FailureKind::StaleIndex => ErrorSeverity::Warning,
            FailureKind::Transient | FailureKind::Rejected | FailureKind::Other => {
                ErrorSeverity::Error
            }
        }
    }
}

/// Extension trait for direct error emission
pub trait ErrorExt {
    fn emit_event(&self, severity: ErrorSeverity);
}

impl<E> ErrorExt for E
where
    E: std::error::Error,
{
    fn emit_event(&self, severity: ErrorSeverity) {
        match severity {
            ErrorSeverity::Warning => warn!(target: "bugledger_tui::error", "Warning: {}", self),
            ErrorSeverity::Error => error!(target: "bugledger_tui::error", "Error: {}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_index_is_only_a_warning() {
        let stale = StoreError::StaleIndex { index: 3, count: 1 };
        assert_eq!(ErrorSeverity::from(&stale), ErrorSeverity::Warning);

        let rejected = StoreError::Rejected {
            code: -32000,
            message: "revert".into(),
        };
        assert_eq!(ErrorSeverity::from(&rejected), ErrorSeverity::Error);
    }
}
