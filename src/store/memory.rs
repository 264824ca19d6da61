//! In-memory snapshot source and duty store.

use std::collections::HashMap;

use super::{DutyId, DutyStore, DutyView, SnapshotSource, StoreError};
use crate::models::{Duty, DutyRef, ExamSession, Teacher};

/// A store that keeps teachers, sessions, and duties in memory.
///
/// Duty IDs are assigned sequentially (`D1`, `D2`, ...).
///
/// # Example
/// ```
/// use u_duty::store::{InMemoryStore, SnapshotSource};
/// use u_duty::models::Teacher;
///
/// let store = InMemoryStore::new()
///     .with_teachers(vec![Teacher::new("A", "X").with_subject("Math")])
///     .with_subject("Math", "Mathematics");
/// assert_eq!(store.load_teachers().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    teachers: Vec<Teacher>,
    sessions: Vec<ExamSession>,
    subject_names: HashMap<String, String>,
    duties: Vec<(DutyId, Duty)>,
    next_id: u64,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the teacher roster.
    pub fn with_teachers(mut self, teachers: Vec<Teacher>) -> Self {
        self.teachers = teachers;
        self
    }

    /// Sets the exam schedule.
    pub fn with_sessions(mut self, sessions: Vec<ExamSession>) -> Self {
        self.sessions = sessions;
        self
    }

    /// Registers a subject display name.
    pub fn with_subject(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.subject_names.insert(id.into(), name.into());
        self
    }

    /// Stored teachers, with histories as last written.
    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    /// Finds a stored teacher.
    pub fn teacher(&self, id: &str) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id == id)
    }

    /// Stored duties in insertion order.
    pub fn duties(&self) -> impl Iterator<Item = &Duty> {
        self.duties.iter().map(|(_, d)| d)
    }

    /// Number of stored duties.
    pub fn duty_count(&self) -> usize {
        self.duties.len()
    }

    fn teacher_name(&self, id: &str) -> String {
        self.teacher(id)
            .map(|t| t.label().to_string())
            .unwrap_or_else(|| id.to_string())
    }
}

impl SnapshotSource for InMemoryStore {
    fn load_teachers(&self) -> Result<Vec<Teacher>, StoreError> {
        Ok(self.teachers.clone())
    }

    fn load_sessions(&self) -> Result<Vec<ExamSession>, StoreError> {
        Ok(self.sessions.clone())
    }
}

impl DutyStore for InMemoryStore {
    fn persist_duty(&mut self, duty: &Duty) -> Result<DutyId, StoreError> {
        self.next_id += 1;
        let id = format!("D{}", self.next_id);
        self.duties.push((id.clone(), duty.clone()));
        Ok(id)
    }

    fn append_duty_to_teacher(
        &mut self,
        teacher_id: &str,
        duty: &DutyRef,
    ) -> Result<(), StoreError> {
        let teacher = self
            .teachers
            .iter_mut()
            .find(|t| t.id == teacher_id)
            .ok_or_else(|| StoreError::UnknownTeacher(teacher_id.to_string()))?;
        teacher.record_duty(duty.clone());
        Ok(())
    }

    fn list_all_duties(&self) -> Result<Vec<DutyView>, StoreError> {
        Ok(self
            .duties
            .iter()
            .map(|(id, duty)| DutyView {
                id: id.clone(),
                duty: duty.clone(),
                subject_name: self
                    .subject_names
                    .get(&duty.subject)
                    .cloned()
                    .unwrap_or_else(|| duty.subject.clone()),
                invigilator_names: [
                    self.teacher_name(&duty.invigilators[0]),
                    self.teacher_name(&duty.invigilators[1]),
                ],
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Shift;
    use chrono::NaiveDate;

    fn duty() -> Duty {
        Duty {
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            shift: Shift::Morning,
            subject: "Math".into(),
            room: "R1".into(),
            invigilators: ["B".into(), "Q".into()],
            standard: None,
        }
    }

    fn store() -> InMemoryStore {
        InMemoryStore::new()
            .with_teachers(vec![
                Teacher::new("B", "X").with_name("Bina").with_subject("Eng"),
                Teacher::new("C", "Y").with_subject("Eng"),
            ])
            .with_subject("Math", "Mathematics")
    }

    #[test]
    fn test_sequential_ids() {
        let mut s = store();
        assert_eq!(s.persist_duty(&duty()).unwrap(), "D1");
        assert_eq!(s.persist_duty(&duty()).unwrap(), "D2");
        assert_eq!(s.duty_count(), 2);
    }

    #[test]
    fn test_append_updates_history() {
        let mut s = store();
        let d = duty();
        let id = s.persist_duty(&d).unwrap();
        s.append_duty_to_teacher("B", &d.to_ref(id)).unwrap();
        assert!(s.teacher("B").unwrap().is_booked(d.date, d.shift));
        assert!(!s.teacher("C").unwrap().is_booked(d.date, d.shift));
    }

    #[test]
    fn test_append_unknown_teacher() {
        let mut s = store();
        let d = duty();
        let err = s.append_duty_to_teacher("Q", &d.to_ref("D1")).unwrap_err();
        assert_eq!(err, StoreError::UnknownTeacher("Q".into()));
    }

    #[test]
    fn test_list_resolves_names() {
        let mut s = store();
        s.persist_duty(&duty()).unwrap();
        let views = s.list_all_duties().unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].id, "D1");
        assert_eq!(views[0].subject_name, "Mathematics");
        // Unknown teacher falls back to its ID
        assert_eq!(views[0].invigilator_names, ["Bina".to_string(), "Q".to_string()]);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let s = store();
        let mut teachers = s.load_teachers().unwrap();
        teachers[0].subjects.clear();
        assert!(s.teacher("B").unwrap().teaches("Eng"));
        assert!(s.load_sessions().unwrap().is_empty());
    }
}
