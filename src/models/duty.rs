//! Duty (assignment output) model.
//!
//! A duty records that two invigilators supervise one exam session in
//! its first room.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{DutyRef, ExamSession, Shift};

/// An invigilation duty: one exam session supervised by two teachers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duty {
    /// Exam date.
    pub date: NaiveDate,
    /// Exam shift.
    pub shift: Shift,
    /// Subject identifier of the exam.
    pub subject: String,
    /// Assigned room (the session's first room).
    pub room: String,
    /// Teacher IDs of the two invigilators. Always distinct.
    pub invigilators: [String; 2],
    /// Standard/grade label copied from the session.
    pub standard: Option<String>,
}

impl Duty {
    /// Builds the duty for a session and an invigilator pair.
    ///
    /// Returns `None` if the session has no rooms.
    pub fn for_session(
        session: &ExamSession,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Option<Self> {
        let room = session.primary_room()?;
        Some(Self {
            date: session.date,
            shift: session.shift,
            subject: session.subject.clone(),
            room: room.to_string(),
            invigilators: [first.into(), second.into()],
            standard: session.standard.clone(),
        })
    }

    /// Whether the given teacher invigilates this duty.
    pub fn involves(&self, teacher_id: &str) -> bool {
        self.invigilators.iter().any(|id| id == teacher_id)
    }

    /// Whether this duty occupies the given slot.
    #[inline]
    pub fn occupies(&self, date: NaiveDate, shift: Shift) -> bool {
        self.date == date && self.shift == shift
    }

    /// Reference to append to each invigilator's history once stored.
    pub fn to_ref(&self, duty_id: impl Into<String>) -> DutyRef {
        DutyRef::on_date(duty_id, self.date, self.shift)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> ExamSession {
        ExamSession::new(
            "E1",
            "Math",
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            Shift::Morning,
        )
        .with_room("R1")
        .with_room("R2")
        .with_standard("9")
    }

    #[test]
    fn test_duty_for_session_uses_first_room() {
        let d = Duty::for_session(&session(), "B", "C").unwrap();
        assert_eq!(d.room, "R1");
        assert_eq!(d.subject, "Math");
        assert_eq!(d.invigilators, ["B".to_string(), "C".to_string()]);
        assert_eq!(d.standard.as_deref(), Some("9"));
        assert!(d.involves("C"));
        assert!(!d.involves("A"));
    }

    #[test]
    fn test_duty_without_rooms() {
        let mut s = session();
        s.rooms.clear();
        assert!(Duty::for_session(&s, "B", "C").is_none());
    }

    #[test]
    fn test_duty_ref_matches_slot() {
        let d = Duty::for_session(&session(), "B", "C").unwrap();
        let r = d.to_ref("D7");
        assert_eq!(r.duty_id, "D7");
        assert!(r.occupies(d.date, Shift::Morning));
        assert!(d.occupies(d.date, Shift::Morning));
        assert!(!d.occupies(d.date, Shift::Evening));
    }
}
