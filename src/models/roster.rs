//! Duty roster (solution) model.
//!
//! A roster is the set of duties produced by one allocation run, plus any
//! rule violations found when auditing it against the teacher snapshot.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use super::{Duty, Shift, Teacher};

/// A set of duties and the violations detected in them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DutyRoster {
    /// Duties in allocation order.
    pub duties: Vec<Duty>,
    /// Violations found by [`DutyRoster::audit`].
    pub violations: Vec<Violation>,
}

/// A rule violation found in a roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related teacher ID.
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
    /// Severity (0-100, higher = worse).
    pub severity: i32,
}

/// Classification of roster violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Invigilator teaches the exam's subject.
    OwnSubject,
    /// Invigilator holds two duties in the same date + shift.
    DoubleBooked,
    /// Both invigilator slots hold the same teacher.
    DuplicateInvigilator,
    /// Invigilator is not in the teacher snapshot.
    UnknownTeacher,
    /// Both invigilators come from one school. Permitted in relaxed mode.
    SameSchool,
}

impl ViolationType {
    /// Whether this violation breaks a rule that is never relaxed.
    pub fn is_hard(&self) -> bool {
        !matches!(self, ViolationType::SameSchool)
    }
}

impl Violation {
    fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
        severity: i32,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
            severity,
        }
    }

    /// Creates an own-subject violation.
    pub fn own_subject(teacher_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationType::OwnSubject, teacher_id, message, 90)
    }

    /// Creates a double-booking violation.
    pub fn double_booked(teacher_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationType::DoubleBooked, teacher_id, message, 90)
    }

    /// Creates a duplicate-invigilator violation.
    pub fn duplicate_invigilator(
        teacher_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(ViolationType::DuplicateInvigilator, teacher_id, message, 95)
    }

    /// Creates an unknown-teacher violation.
    pub fn unknown_teacher(teacher_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationType::UnknownTeacher, teacher_id, message, 100)
    }

    /// Creates a same-school violation.
    pub fn same_school(teacher_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationType::SameSchool, teacher_id, message, 30)
    }
}

impl DutyRoster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a roster from duties, without auditing.
    pub fn from_duties(duties: Vec<Duty>) -> Self {
        Self {
            duties,
            violations: Vec::new(),
        }
    }

    /// Adds a duty.
    pub fn add_duty(&mut self, duty: Duty) {
        self.duties.push(duty);
    }

    /// Adds a violation.
    pub fn add_violation(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Whether the roster has no violations.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Whether the roster has no violations besides same-school pairs.
    pub fn is_feasible(&self) -> bool {
        self.violations.iter().all(|v| !v.violation_type.is_hard())
    }

    /// Number of duties.
    pub fn duty_count(&self) -> usize {
        self.duties.len()
    }

    /// Returns all duties invigilated by a teacher.
    pub fn duties_for_teacher(&self, teacher_id: &str) -> Vec<&Duty> {
        self.duties.iter().filter(|d| d.involves(teacher_id)).collect()
    }

    /// Returns all duties in a date + shift slot.
    pub fn duties_in_slot(&self, date: NaiveDate, shift: Shift) -> Vec<&Duty> {
        self.duties
            .iter()
            .filter(|d| d.occupies(date, shift))
            .collect()
    }

    /// Duty count per teacher, for teachers with at least one duty.
    pub fn load_by_teacher(&self) -> HashMap<String, usize> {
        let mut load: HashMap<String, usize> = HashMap::new();
        for d in &self.duties {
            for id in &d.invigilators {
                *load.entry(id.clone()).or_insert(0) += 1;
            }
        }
        load
    }

    /// Number of distinct teachers holding a duty.
    pub fn teachers_used(&self) -> usize {
        self.duties
            .iter()
            .flat_map(|d| d.invigilators.iter())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Re-checks every duty against the teacher snapshot.
    ///
    /// Replaces any previous violations. Double-booking is checked among the
    /// roster's own duties only, so the snapshot may be taken before or after
    /// the run that produced the roster.
    ///
    /// # Checks
    /// 1. Each invigilator exists in `teachers`
    /// 2. The two invigilators are distinct
    /// 3. No invigilator teaches the exam's subject
    /// 4. No invigilator holds two duties in one date + shift
    /// 5. The two invigilators come from different schools (soft)
    pub fn audit(&mut self, teachers: &[Teacher]) {
        self.violations.clear();
        let by_id: HashMap<&str, &Teacher> =
            teachers.iter().map(|t| (t.id.as_str(), t)).collect();
        let mut slots: HashSet<(&str, NaiveDate, Shift)> = HashSet::new();
        let mut found = Vec::new();

        for duty in &self.duties {
            let [first, second] = &duty.invigilators;
            if first == second {
                found.push(Violation::duplicate_invigilator(
                    first.as_str(),
                    format!("Teacher '{first}' fills both slots of a {} duty", duty.subject),
                ));
            }

            for id in &duty.invigilators {
                match by_id.get(id.as_str()) {
                    None => found.push(Violation::unknown_teacher(
                        id.as_str(),
                        format!("Duty for {} references unknown teacher '{id}'", duty.subject),
                    )),
                    Some(t) if t.teaches(&duty.subject) => found.push(Violation::own_subject(
                        id.as_str(),
                        format!("Teacher '{id}' invigilates own subject {}", duty.subject),
                    )),
                    Some(_) => {}
                }
            }

            for id in duty.invigilators.iter().collect::<HashSet<_>>() {
                if !slots.insert((id.as_str(), duty.date, duty.shift)) {
                    found.push(Violation::double_booked(
                        id.as_str(),
                        format!(
                            "Teacher '{id}' holds more than one duty on {} {}",
                            duty.date, duty.shift
                        ),
                    ));
                }
            }

            if let (Some(a), Some(b)) = (by_id.get(first.as_str()), by_id.get(second.as_str())) {
                if first != second && a.same_school_as(b) {
                    found.push(Violation::same_school(
                        first.as_str(),
                        format!(
                            "Teachers '{first}' and '{second}' share school '{}' on {} duty",
                            a.school, duty.subject
                        ),
                    ));
                }
            }
        }

        self.violations = found;
    }
}
