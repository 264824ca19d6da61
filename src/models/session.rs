//! Exam session model.
//!
//! An exam session is the demand side of the assignment problem: one
//! subject sat on one date during one shift, across one or more rooms.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily exam period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Shift {
    /// Morning sitting.
    Morning,
    /// Evening sitting.
    Evening,
}

impl Shift {
    /// Both shifts in chronological order.
    pub const ALL: [Shift; 2] = [Shift::Morning, Shift::Evening];

    /// Display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Shift::Morning => "Morning",
            Shift::Evening => "Evening",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled exam sitting that needs two invigilators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamSession {
    /// Unique session identifier.
    pub id: String,
    /// Subject identifier of the exam.
    pub subject: String,
    /// Calendar date.
    pub date: NaiveDate,
    /// Exam shift.
    pub shift: Shift,
    /// Room labels. Must be non-empty; the first room hosts the duty.
    pub rooms: Vec<String>,
    /// Standard/grade label, if any.
    #[serde(default)]
    pub standard: Option<String>,
}

impl ExamSession {
    /// Creates a session with no rooms.
    pub fn new(
        id: impl Into<String>,
        subject: impl Into<String>,
        date: NaiveDate,
        shift: Shift,
    ) -> Self {
        Self {
            id: id.into(),
            subject: subject.into(),
            date,
            shift,
            rooms: Vec::new(),
            standard: None,
        }
    }

    /// Adds a room.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.rooms.push(room.into());
        self
    }

    /// Sets the standard/grade label.
    pub fn with_standard(mut self, standard: impl Into<String>) -> Self {
        self.standard = Some(standard.into());
        self
    }

    /// The room the duty is held in.
    pub fn primary_room(&self) -> Option<&str> {
        self.rooms.first().map(String::as_str)
    }

    /// Compact identity used in errors and logs.
    pub fn key(&self) -> SessionKey {
        SessionKey {
            id: self.id.clone(),
            subject: self.subject.clone(),
            date: self.date,
            shift: self.shift,
        }
    }
}

/// Identity of a session, carried by allocation errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionKey {
    /// Session identifier.
    pub id: String,
    /// Subject identifier.
    pub subject: String,
    /// Calendar date.
    pub date: NaiveDate,
    /// Shift.
    pub shift: Shift,
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "session '{}' ({} on {} {})",
            self.id, self.subject, self.date, self.shift
        )
    }
}
