//! Teacher (invigilator candidate) model.
//!
//! A teacher is the resource side of the assignment problem: each one
//! teaches a set of subjects, belongs to one home school, and carries a
//! history of duties already assigned.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::Shift;

/// A reference to a duty already held by a teacher.
///
/// Only the slot (date + shift) matters for eligibility; the id links back
/// to the stored duty record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyRef {
    /// Stored duty identifier.
    pub duty_id: String,
    /// Duty date. Time-of-day is ignored when comparing slots.
    pub date: NaiveDateTime,
    /// Duty shift.
    pub shift: Shift,
}

impl DutyRef {
    /// Creates a duty reference from a date-time.
    pub fn new(duty_id: impl Into<String>, date: NaiveDateTime, shift: Shift) -> Self {
        Self {
            duty_id: duty_id.into(),
            date,
            shift,
        }
    }

    /// Creates a duty reference at midnight of the given calendar date.
    pub fn on_date(duty_id: impl Into<String>, date: NaiveDate, shift: Shift) -> Self {
        Self::new(duty_id, date.and_time(NaiveTime::MIN), shift)
    }

    /// Whether this duty occupies the given date + shift slot.
    #[inline]
    pub fn occupies(&self, date: NaiveDate, shift: Shift) -> bool {
        self.date.date() == date && self.shift == shift
    }
}

/// A teacher who may be assigned as an invigilator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Subject identifiers this teacher teaches.
    pub subjects: Vec<String>,
    /// Home school identifier.
    pub school: String,
    /// Duties already assigned, in assignment order.
    #[serde(default)]
    pub duties: Vec<DutyRef>,
}

impl Teacher {
    /// Creates a teacher with the given ID and home school.
    pub fn new(id: impl Into<String>, school: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            subjects: Vec::new(),
            school: school.into(),
            duties: Vec::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a taught subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subjects.push(subject.into());
        self
    }

    /// Adds several taught subjects.
    pub fn with_subjects<I, S>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subjects.extend(subjects.into_iter().map(Into::into));
        self
    }

    /// Adds an existing duty to the history.
    pub fn with_duty(mut self, duty: DutyRef) -> Self {
        self.duties.push(duty);
        self
    }

    /// Whether this teacher teaches the given subject.
    pub fn teaches(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s == subject)
    }

    /// Whether this teacher already holds a duty in the given slot.
    pub fn is_booked(&self, date: NaiveDate, shift: Shift) -> bool {
        self.duties.iter().any(|d| d.occupies(date, shift))
    }

    /// Whether both teachers belong to the same home school.
    #[inline]
    pub fn same_school_as(&self, other: &Teacher) -> bool {
        self.school == other.school
    }

    /// Records a newly assigned duty.
    pub fn record_duty(&mut self, duty: DutyRef) {
        self.duties.push(duty);
    }

    /// Number of duties held.
    pub fn duty_count(&self) -> usize {
        self.duties.len()
    }

    /// Label used in logs and reports: the name when set, else the ID.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}
