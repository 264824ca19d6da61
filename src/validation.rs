//! Snapshot validation for allocation runs.
//!
//! Checks structural integrity of the teacher and exam-session snapshots
//! before allocation. Detects:
//! - Duplicate IDs
//! - Teachers without a home school
//! - Sessions without a subject
//! - Sessions without rooms
//!
//! Teachers with no subjects are not rejected here; the eligibility rules
//! treat them as ineligible instead.

use crate::models::{ExamSession, Teacher};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// An entity has an empty ID.
    MissingId,
    /// A teacher has no home school.
    MissingSchool,
    /// A session has no subject.
    MissingSubject,
    /// A session has no rooms.
    EmptyRooms,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates the teacher and session snapshots for one allocation run.
///
/// Checks:
/// 1. Every teacher and session has a non-empty ID
/// 2. No duplicate teacher IDs
/// 3. No duplicate session IDs
/// 4. Every teacher has a home school
/// 5. Every session has a subject
/// 6. Every session has at least one room
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_snapshot(teachers: &[Teacher], sessions: &[ExamSession]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut teacher_ids = HashSet::new();
    for t in teachers {
        if t.id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingId,
                format!("Teacher '{}' has no ID", t.name),
            ));
        } else if !teacher_ids.insert(t.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate teacher ID: {}", t.id),
            ));
        }

        if t.school.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingSchool,
                format!("Teacher '{}' has no school", t.id),
            ));
        }
    }

    let mut session_ids = HashSet::new();
    for s in sessions {
        if s.id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingId,
                format!("Session for {} on {} has no ID", s.subject, s.date),
            ));
        } else if !session_ids.insert(s.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate session ID: {}", s.id),
            ));
        }

        if s.subject.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingSubject,
                format!("Session '{}' has no subject", s.id),
            ));
        }

        if s.rooms.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyRooms,
                format!("Session '{}' has no rooms", s.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
