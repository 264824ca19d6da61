//! Eligibility rules for pairing teachers with exam sessions.
//!
//! Provides the four built-in invigilation rules and a composable
//! [`Criteria`] set. Two standard criteria drive allocation:
//!
//! - **Strict**: subjects present, not own subject, not double-booked,
//!   and not from the same school as the first pick.
//! - **Relaxed**: strict without the same-school rule. Used only when the
//!   strict search is exhausted.
//!
//! # Usage
//!
//! ```
//! use u_duty::eligibility::{meets_full_criteria, Criteria, PairingContext};
//! use u_duty::models::{ExamSession, Shift, Teacher};
//! use chrono::NaiveDate;
//!
//! let session = ExamSession::new(
//!     "E1",
//!     "Math",
//!     NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
//!     Shift::Morning,
//! )
//! .with_room("R1");
//! let teacher = Teacher::new("B", "SchoolX").with_subject("Eng");
//!
//! assert!(meets_full_criteria(&teacher, &session, None));
//! assert!(Criteria::strict().is_satisfied_by(&teacher, &session, &PairingContext::first()));
//! ```

mod criteria;
pub mod rules;

pub use criteria::Criteria;

use crate::models::{ExamSession, Teacher};
use std::fmt::Debug;

use rules::{DistinctSchool, HasSubjects, NoDoubleBooking, NotOwnSubject};

/// Pairing state passed to eligibility rules.
///
/// Holds the invigilator already chosen for the session, if any.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairingContext<'a> {
    /// The first invigilator selected for the session.
    pub first_pick: Option<&'a Teacher>,
}

impl<'a> PairingContext<'a> {
    /// Context for choosing the first invigilator.
    pub fn first() -> Self {
        Self { first_pick: None }
    }

    /// Context for choosing a partner for `first_pick`.
    pub fn partner_of(first_pick: &'a Teacher) -> Self {
        Self {
            first_pick: Some(first_pick),
        }
    }

    /// Context from an optional first pick.
    pub fn with_first_pick(first_pick: Option<&'a Teacher>) -> Self {
        Self { first_pick }
    }
}

/// A single eligibility rule.
///
/// Rules are pure predicates: they never mutate the candidate or the pool.
pub trait EligibilityRule: Send + Sync + Debug {
    /// Rule name (e.g., "NOT_OWN_SUBJECT").
    fn name(&self) -> &'static str;

    /// Whether the candidate may invigilate the session under this rule.
    fn admits(
        &self,
        candidate: &Teacher,
        session: &ExamSession,
        context: &PairingContext<'_>,
    ) -> bool;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Strict eligibility: all four rules.
///
/// `first_pick` is the invigilator already chosen for this session, if any.
pub fn meets_full_criteria(
    candidate: &Teacher,
    session: &ExamSession,
    first_pick: Option<&Teacher>,
) -> bool {
    let ctx = PairingContext::with_first_pick(first_pick);
    meets_relaxed_criteria(candidate, session) && DistinctSchool.admits(candidate, session, &ctx)
}

/// Relaxed eligibility: strict without the same-school rule.
pub fn meets_relaxed_criteria(candidate: &Teacher, session: &ExamSession) -> bool {
    let ctx = PairingContext::first();
    HasSubjects.admits(candidate, session, &ctx)
        && NotOwnSubject.admits(candidate, session, &ctx)
        && NoDoubleBooking.admits(candidate, session, &ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DutyRef, Shift};
    use chrono::NaiveDate;

    fn jan_10() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    fn math_morning() -> ExamSession {
        ExamSession::new("E1", "Math", jan_10(), Shift::Morning).with_room("R1")
    }

    #[test]
    fn test_own_subject_rejected() {
        let a = Teacher::new("A", "X").with_subjects(["Math", "Sci"]);
        assert!(!meets_full_criteria(&a, &math_morning(), None));
        assert!(!meets_relaxed_criteria(&a, &math_morning()));
    }

    #[test]
    fn test_double_booking_rejected() {
        let b = Teacher::new("B", "X")
            .with_subject("Eng")
            .with_duty(DutyRef::on_date("D1", jan_10(), Shift::Morning));
        assert!(!meets_full_criteria(&b, &math_morning(), None));
        assert!(!meets_relaxed_criteria(&b, &math_morning()));

        let evening = ExamSession::new("E2", "Math", jan_10(), Shift::Evening).with_room("R1");
        assert!(meets_full_criteria(&b, &evening, None));
    }

    #[test]
    fn test_same_school_only_in_strict() {
        let b = Teacher::new("B", "X").with_subject("Eng");
        let c = Teacher::new("C", "X").with_subject("Eng");
        assert!(!meets_full_criteria(&c, &math_morning(), Some(&b)));
        assert!(meets_relaxed_criteria(&c, &math_morning()));

        let d = Teacher::new("D", "Y").with_subject("Eng");
        assert!(meets_full_criteria(&d, &math_morning(), Some(&b)));
    }

    #[test]
    fn test_missing_subjects_rejected() {
        let blank = Teacher::new("Z", "X");
        assert!(!meets_relaxed_criteria(&blank, &math_morning()));

        let mut no_subject = math_morning();
        no_subject.subject.clear();
        let b = Teacher::new("B", "X").with_subject("Eng");
        assert!(!meets_full_criteria(&b, &no_subject, None));
    }

    #[test]
    fn test_free_functions_agree_with_criteria() {
        let b = Teacher::new("B", "X").with_subject("Eng");
        let c = Teacher::new("C", "X").with_subject("Eng");
        let session = math_morning();
        let ctx = PairingContext::partner_of(&b);

        assert_eq!(
            meets_full_criteria(&c, &session, Some(&b)),
            Criteria::strict().is_satisfied_by(&c, &session, &ctx)
        );
        assert_eq!(
            meets_relaxed_criteria(&c, &session),
            Criteria::relaxed().is_satisfied_by(&c, &session, &ctx)
        );
    }
}
