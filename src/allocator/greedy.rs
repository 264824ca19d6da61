//! Greedy pool-consuming duty allocator.
//!
//! # Algorithm
//!
//! 1. Copy the teacher snapshot into a [`CandidatePool`].
//! 2. For each session, in snapshot order:
//!    a. Take the first strict-eligible teacher from the pool, falling back
//!       to the first relaxed-eligible one.
//!    b. Repeat for the partner, with the first pick as pairing context.
//!    c. If the first pick teaches the session's subject, take a relaxed
//!       replacement and return the original to the end of the pool.
//!    d. Store the duty, append it to both histories (store and memory).
//! 3. Fail on the first session that cannot be staffed. Earlier duties stay
//!    stored.
//!
//! First-fit, not optimal: a different pool order can staff a schedule
//! this allocator rejects.
//!
//! # Complexity
//! O(s * t * r) where s=sessions, t=teachers, r=rules per criteria.

use std::collections::HashMap;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::{
    Allocation, AllocationError, AllocatorConfig, CandidatePool, PickMode, SessionOutcome,
};
use crate::eligibility::{Criteria, PairingContext};
use crate::models::{Duty, ExamSession, Teacher};
use crate::store::{DutyStore, InMemoryStore};
use crate::validation::{validate_snapshot, ValidationError, ValidationErrorKind};

/// Greedy two-tier duty allocator.
///
/// # Example
///
/// ```
/// use u_duty::allocator::DutyAllocator;
/// use u_duty::models::{ExamSession, Shift, Teacher};
/// use chrono::NaiveDate;
///
/// let teachers = vec![
///     Teacher::new("A", "SchoolX").with_subjects(["Math", "Sci"]),
///     Teacher::new("B", "SchoolX").with_subject("Eng"),
///     Teacher::new("C", "SchoolY").with_subject("Eng"),
///     Teacher::new("D", "SchoolY").with_subject("Math"),
/// ];
/// let sessions = vec![ExamSession::new(
///     "E1",
///     "Math",
///     NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
///     Shift::Morning,
/// )
/// .with_room("R1")];
///
/// let allocation = DutyAllocator::new().plan(&teachers, &sessions).unwrap();
/// assert_eq!(allocation.duties[0].duty.invigilators, ["B".to_string(), "C".to_string()]);
/// ```
#[derive(Debug, Clone)]
pub struct DutyAllocator {
    strict: Criteria,
    relaxed: Criteria,
    config: AllocatorConfig,
}

impl DutyAllocator {
    /// Creates an allocator with the standard strict/relaxed criteria.
    pub fn new() -> Self {
        Self {
            strict: Criteria::strict(),
            relaxed: Criteria::relaxed(),
            config: AllocatorConfig::default(),
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: AllocatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the criteria used by the first-tier search.
    pub fn with_strict_criteria(mut self, criteria: Criteria) -> Self {
        self.strict = criteria;
        self
    }

    /// Replaces the criteria used by the fallback search and by repair.
    pub fn with_relaxed_criteria(mut self, criteria: Criteria) -> Self {
        self.relaxed = criteria;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Staffs every session and writes the duties to `store`.
    ///
    /// `teachers` and `sessions` must be the full current snapshot. The
    /// snapshot itself is never mutated; the returned [`Allocation`] holds
    /// the updated teacher records.
    ///
    /// # Errors
    /// The first session that cannot be staffed ends the run. Duties stored
    /// for earlier sessions are not rolled back.
    pub fn allocate<S>(
        &self,
        teachers: &[Teacher],
        sessions: &[ExamSession],
        store: &mut S,
    ) -> Result<Allocation, AllocationError>
    where
        S: DutyStore + ?Sized,
    {
        if self.config.validate_snapshot {
            validate_snapshot(teachers, sessions).map_err(AllocationError::InvalidSnapshot)?;
        }

        info!(
            teachers = teachers.len(),
            sessions = sessions.len(),
            "starting duty allocation"
        );

        let started = Instant::now();
        let mut pool = CandidatePool::from_snapshot(teachers);
        let mut assigned = Vec::with_capacity(sessions.len() * 2);
        let mut outcomes = Vec::with_capacity(sessions.len());

        for (index, session) in sessions.iter().enumerate() {
            self.check_budget(started, index)?;
            let outcome = self.staff_session(session, &mut pool, &mut assigned, store)?;
            outcomes.push(outcome);
        }

        let duties = store.list_all_duties()?;
        let remaining = pool.len();
        let teachers = merge_roster(teachers, pool.into_inner(), assigned);

        info!(
            staffed = outcomes.len(),
            remaining,
            elapsed = ?started.elapsed(),
            "duty allocation committed"
        );

        Ok(Allocation {
            duties,
            outcomes,
            teachers,
        })
    }

    /// Allocates against a fresh in-memory store seeded with `teachers`.
    pub fn plan(
        &self,
        teachers: &[Teacher],
        sessions: &[ExamSession],
    ) -> Result<Allocation, AllocationError> {
        let mut store = InMemoryStore::new().with_teachers(teachers.to_vec());
        self.allocate(teachers, sessions, &mut store)
    }

    fn check_budget(&self, started: Instant, completed: usize) -> Result<(), AllocationError> {
        if let Some(budget) = self.config.time_budget() {
            if started.elapsed() >= budget {
                return Err(AllocationError::BudgetExceeded {
                    budget_ms: self.config.time_budget_ms.unwrap_or_default(),
                    completed,
                });
            }
        }
        Ok(())
    }

    fn staff_session<S>(
        &self,
        session: &ExamSession,
        pool: &mut CandidatePool,
        assigned: &mut Vec<Teacher>,
        store: &mut S,
    ) -> Result<SessionOutcome, AllocationError>
    where
        S: DutyStore + ?Sized,
    {
        let (mut first, first_mode) = self
            .pick(session, pool, None)
            .ok_or_else(|| insufficient(session, 0))?;
        let (mut second, second_mode) = self
            .pick(session, pool, Some(&first))
            .ok_or_else(|| insufficient(session, 1))?;
        let mut picks = [first_mode, second_mode];
        let mut replaced = None;

        // Predicates normally exclude subject teachers already; this catches
        // criteria built without NOT_OWN_SUBJECT. The replacement must not
        // teach the subject whatever the configured criteria say.
        if self.config.repair_subject_conflicts && first.teaches(&session.subject) {
            let context = PairingContext::first();
            let replacement = pool
                .take(|c| {
                    !c.teaches(&session.subject)
                        && self.relaxed.is_satisfied_by(c, session, &context)
                })
                .ok_or_else(|| AllocationError::UnresolvableSubjectConflict {
                    session: session.key(),
                    teacher_id: first.id.clone(),
                })?;
            warn!(
                session = %session.id,
                replaced = %first.id,
                replacement = %replacement.id,
                "first invigilator teaches the subject, replacing"
            );
            let original = std::mem::replace(&mut first, replacement);
            replaced = Some(original.id.clone());
            pool.release(original);
            picks[0] = PickMode::Relaxed;
        }

        let duty = Duty::for_session(session, first.id.as_str(), second.id.as_str())
            .ok_or_else(|| {
                AllocationError::InvalidSnapshot(vec![ValidationError::new(
                    ValidationErrorKind::EmptyRooms,
                    format!("Session '{}' has no rooms", session.id),
                )])
            })?;

        let duty_id = store.persist_duty(&duty)?;
        let duty_ref = duty.to_ref(duty_id.clone());
        for teacher in [&mut first, &mut second] {
            store.append_duty_to_teacher(&teacher.id, &duty_ref)?;
            teacher.record_duty(duty_ref.clone());
        }

        debug!(
            session = %session.id,
            duty = %duty_id,
            first = %first.id,
            second = %second.id,
            "session staffed"
        );

        let outcome = SessionOutcome {
            session_id: session.id.clone(),
            duty_id,
            invigilators: [first.id.clone(), second.id.clone()],
            picks,
            replaced,
        };
        assigned.push(first);
        assigned.push(second);
        Ok(outcome)
    }

    /// Takes the next invigilator: strict search first, then relaxed.
    fn pick(
        &self,
        session: &ExamSession,
        pool: &mut CandidatePool,
        first_pick: Option<&Teacher>,
    ) -> Option<(Teacher, PickMode)> {
        let context = PairingContext::with_first_pick(first_pick);

        if let Some(teacher) = pool.take(|c| self.strict.is_satisfied_by(c, session, &context)) {
            debug!(session = %session.id, teacher = %teacher.id, "strict pick");
            return Some((teacher, PickMode::Strict));
        }

        if !self.config.allow_relaxed_fallback {
            return None;
        }

        let teacher = pool.take(|c| self.relaxed.is_satisfied_by(c, session, &context))?;
        warn!(
            session = %session.id,
            teacher = %teacher.id,
            school = %teacher.school,
            "strict search exhausted, using relaxed pick"
        );
        Some((teacher, PickMode::Relaxed))
    }
}

impl Default for DutyAllocator {
    fn default() -> Self {
        Self::new()
    }
}

fn insufficient(session: &ExamSession, selected: usize) -> AllocationError {
    AllocationError::InsufficientCandidates {
        session: session.key(),
        selected,
    }
}

/// Rebuilds the roster in snapshot order from the pool remainder and the
/// assigned teachers.
fn merge_roster(
    snapshot: &[Teacher],
    remaining: Vec<Teacher>,
    assigned: Vec<Teacher>,
) -> Vec<Teacher> {
    let mut by_id: HashMap<String, Teacher> = remaining
        .into_iter()
        .chain(assigned)
        .map(|t| (t.id.clone(), t))
        .collect();
    snapshot.iter().filter_map(|t| by_id.remove(&t.id)).collect()
}
