//! Candidate pool.
//!
//! The pool is the working set of teachers not yet assigned in the current
//! run. Picking a teacher removes it; the subject-conflict repair step is
//! the only caller that puts one back.

use crate::models::Teacher;

/// Ordered, mutable set of unassigned teachers.
///
/// Scans always run front to back, so the snapshot order decides which of
/// several eligible teachers is picked first.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    candidates: Vec<Teacher>,
}

impl CandidatePool {
    /// Creates a pool that owns the given teachers, in order.
    pub fn new(candidates: Vec<Teacher>) -> Self {
        Self { candidates }
    }

    /// Creates a pool from a copy of the snapshot.
    pub fn from_snapshot(teachers: &[Teacher]) -> Self {
        Self::new(teachers.to_vec())
    }

    /// Removes and returns the first candidate matching `predicate`.
    pub fn take<F>(&mut self, predicate: F) -> Option<Teacher>
    where
        F: FnMut(&Teacher) -> bool,
    {
        let index = self.candidates.iter().position(predicate)?;
        Some(self.candidates.remove(index))
    }

    /// Returns a candidate to the end of the pool.
    pub fn release(&mut self, candidate: Teacher) {
        self.candidates.push(candidate);
    }

    /// Whether a teacher with the given ID is in the pool.
    pub fn contains(&self, teacher_id: &str) -> bool {
        self.candidates.iter().any(|t| t.id == teacher_id)
    }

    /// Candidates in scan order.
    pub fn iter(&self) -> impl Iterator<Item = &Teacher> {
        self.candidates.iter()
    }

    /// Candidate IDs in scan order.
    pub fn ids(&self) -> Vec<&str> {
        self.candidates.iter().map(|t| t.id.as_str()).collect()
    }

    /// Number of candidates left.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the pool is drained.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Consumes the pool, returning the remaining candidates.
    pub fn into_inner(self) -> Vec<Teacher> {
        self.candidates
    }
}
