//! Allocation errors.

use thiserror::Error;

use crate::models::SessionKey;
use crate::store::StoreError;
use crate::validation::ValidationError;

/// Terminal failure of an allocation run.
///
/// Duties stored before the failing session stay stored.
#[derive(Debug, Error)]
pub enum AllocationError {
    /// The snapshot failed validation; nothing was allocated.
    #[error("invalid snapshot: {} problem(s), first: {}", .0.len(), first_message(.0))]
    InvalidSnapshot(Vec<ValidationError>),

    /// Neither the strict nor the relaxed search found an invigilator.
    #[error("no eligible invigilator left for {session} ({selected} of 2 selected)")]
    InsufficientCandidates {
        /// The session that could not be staffed.
        session: SessionKey,
        /// Invigilators found before the search ran dry.
        selected: usize,
    },

    /// The first invigilator teaches the subject and no replacement exists.
    #[error("no replacement for invigilator '{teacher_id}' who teaches the subject of {session}")]
    UnresolvableSubjectConflict {
        /// The session being staffed.
        session: SessionKey,
        /// The conflicting first invigilator.
        teacher_id: String,
    },

    /// The wall-clock budget ran out between sessions.
    #[error("time budget of {budget_ms}ms exceeded after {completed} session(s)")]
    BudgetExceeded {
        /// Configured budget.
        budget_ms: u64,
        /// Sessions staffed before the budget ran out.
        completed: usize,
    },

    /// The store rejected a read or write.
    #[error("persistence failed: {0}")]
    Persistence(#[from] StoreError),
}

impl AllocationError {
    /// The session that triggered the failure, if session-specific.
    pub fn session(&self) -> Option<&SessionKey> {
        match self {
            AllocationError::InsufficientCandidates { session, .. }
            | AllocationError::UnresolvableSubjectConflict { session, .. } => Some(session),
            _ => None,
        }
    }
}

fn first_message(errors: &[ValidationError]) -> &str {
    errors.first().map(|e| e.message.as_str()).unwrap_or("none")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Shift;
    use crate::validation::ValidationErrorKind;
    use chrono::NaiveDate;

    fn key() -> SessionKey {
        SessionKey {
            id: "E1".into(),
            subject: "Math".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            shift: Shift::Morning,
        }
    }

    #[test]
    fn test_insufficient_message() {
        let e = AllocationError::InsufficientCandidates {
            session: key(),
            selected: 1,
        };
        assert_eq!(
            e.to_string(),
            "no eligible invigilator left for session 'E1' (Math on 2024-01-10 Morning) (1 of 2 selected)"
        );
        assert_eq!(e.session().map(|s| s.id.as_str()), Some("E1"));
    }

    #[test]
    fn test_invalid_snapshot_message() {
        let e = AllocationError::InvalidSnapshot(vec![ValidationError::new(
            ValidationErrorKind::EmptyRooms,
            "Session 'E1' has no rooms",
        )]);
        assert!(e.to_string().contains("1 problem(s)"));
        assert!(e.to_string().contains("has no rooms"));
        assert!(e.session().is_none());
    }

    #[test]
    fn test_from_store_error() {
        let e: AllocationError = StoreError::Rejected("disk full".into()).into();
        assert!(matches!(e, AllocationError::Persistence(_)));
        assert_eq!(e.to_string(), "persistence failed: write rejected: disk full");
    }
}
