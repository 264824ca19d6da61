//! Built-in eligibility rules.
//!
//! # Rules
//!
//! | Rule | Rejects | Relaxable |
//! |------|---------|-----------|
//! | HAS_SUBJECTS | Teacher without subjects, or session without subject | No |
//! | NOT_OWN_SUBJECT | Teacher who teaches the exam's subject | No |
//! | NO_DOUBLE_BOOKING | Teacher with a duty in the same date + shift | No |
//! | DISTINCT_SCHOOL | Teacher from the first pick's school | Yes |

use super::{EligibilityRule, PairingContext};
use crate::models::{ExamSession, Teacher};

/// Both sides must carry subject data.
#[derive(Debug, Clone, Copy)]
pub struct HasSubjects;

impl EligibilityRule for HasSubjects {
    fn name(&self) -> &'static str {
        "HAS_SUBJECTS"
    }

    fn admits(
        &self,
        candidate: &Teacher,
        session: &ExamSession,
        _context: &PairingContext<'_>,
    ) -> bool {
        !candidate.subjects.is_empty() && !session.subject.is_empty()
    }

    fn description(&self) -> &'static str {
        "Teacher and session carry subject data"
    }
}

/// No teacher invigilates an exam in a subject they teach.
#[derive(Debug, Clone, Copy)]
pub struct NotOwnSubject;

impl EligibilityRule for NotOwnSubject {
    fn name(&self) -> &'static str {
        "NOT_OWN_SUBJECT"
    }

    fn admits(
        &self,
        candidate: &Teacher,
        session: &ExamSession,
        _context: &PairingContext<'_>,
    ) -> bool {
        !candidate.teaches(&session.subject)
    }

    fn description(&self) -> &'static str {
        "Teacher does not teach the exam's subject"
    }
}

/// No teacher holds two duties in the same date + shift.
///
/// Compares the calendar date only; time-of-day on stored duties is ignored.
#[derive(Debug, Clone, Copy)]
pub struct NoDoubleBooking;

impl EligibilityRule for NoDoubleBooking {
    fn name(&self) -> &'static str {
        "NO_DOUBLE_BOOKING"
    }

    fn admits(
        &self,
        candidate: &Teacher,
        session: &ExamSession,
        _context: &PairingContext<'_>,
    ) -> bool {
        !candidate.is_booked(session.date, session.shift)
    }

    fn description(&self) -> &'static str {
        "Teacher is free in the session's date and shift"
    }
}

/// The two invigilators of a session come from different schools.
///
/// Always admits when no first pick has been made.
#[derive(Debug, Clone, Copy)]
pub struct DistinctSchool;

impl EligibilityRule for DistinctSchool {
    fn name(&self) -> &'static str {
        "DISTINCT_SCHOOL"
    }

    fn admits(
        &self,
        candidate: &Teacher,
        _session: &ExamSession,
        context: &PairingContext<'_>,
    ) -> bool {
        match context.first_pick {
            Some(first) => !candidate.same_school_as(first),
            None => true,
        }
    }

    fn description(&self) -> &'static str {
        "Teacher's school differs from the first invigilator's"
    }
}
