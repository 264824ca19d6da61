//! Allocation results and per-session provenance.

use serde::{Deserialize, Serialize};

use crate::models::{Duty, DutyRoster, Teacher};
use crate::store::{DutyId, DutyView};

/// Which search produced an invigilator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickMode {
    /// Found by the strict search (all rules).
    Strict,
    /// Found only by the relaxed search (same-school rule dropped).
    Relaxed,
}

/// How one session was staffed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOutcome {
    /// Session identifier.
    pub session_id: String,
    /// Stored duty identifier.
    pub duty_id: DutyId,
    /// Final invigilator IDs, in slot order.
    pub invigilators: [String; 2],
    /// Search mode behind each slot.
    pub picks: [PickMode; 2],
    /// Teacher returned to the pool by subject-conflict repair, if any.
    pub replaced: Option<String>,
}

impl SessionOutcome {
    /// Whether any slot needed the relaxed search.
    pub fn is_relaxed(&self) -> bool {
        self.picks.contains(&PickMode::Relaxed)
    }

    /// Whether subject-conflict repair ran.
    pub fn was_repaired(&self) -> bool {
        self.replaced.is_some()
    }
}

/// Result of a committed allocation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Allocation {
    /// Every duty in the store after the run, names resolved.
    pub duties: Vec<DutyView>,
    /// One entry per session, in session order.
    pub outcomes: Vec<SessionOutcome>,
    /// The teacher snapshot with this run's duties appended to the histories.
    pub teachers: Vec<Teacher>,
}

impl Allocation {
    /// The stored duties as a roster (not yet audited).
    pub fn roster(&self) -> DutyRoster {
        DutyRoster::from_duties(self.duties.iter().map(|v| v.duty.clone()).collect())
    }

    /// Duties created by this run, in session order.
    pub fn new_duties(&self) -> Vec<&Duty> {
        self.outcomes
            .iter()
            .filter_map(|o| self.duties.iter().find(|v| v.id == o.duty_id))
            .map(|v| &v.duty)
            .collect()
    }

    /// Number of slots filled by the relaxed search.
    pub fn relaxed_pick_count(&self) -> usize {
        self.outcomes
            .iter()
            .flat_map(|o| o.picks.iter())
            .filter(|p| **p == PickMode::Relaxed)
            .count()
    }

    /// Number of sessions where subject-conflict repair ran.
    pub fn repair_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.was_repaired()).count()
    }

    /// Outcome for a session.
    pub fn outcome_for(&self, session_id: &str) -> Option<&SessionOutcome> {
        self.outcomes.iter().find(|o| o.session_id == session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(picks: [PickMode; 2], replaced: Option<&str>) -> SessionOutcome {
        SessionOutcome {
            session_id: "E1".into(),
            duty_id: "D1".into(),
            invigilators: ["B".into(), "C".into()],
            picks,
            replaced: replaced.map(String::from),
        }
    }

    #[test]
    fn test_outcome_flags() {
        let strict = outcome([PickMode::Strict, PickMode::Strict], None);
        assert!(!strict.is_relaxed());
        assert!(!strict.was_repaired());

        let relaxed = outcome([PickMode::Strict, PickMode::Relaxed], Some("A"));
        assert!(relaxed.is_relaxed());
        assert!(relaxed.was_repaired());
    }

    #[test]
    fn test_allocation_counts() {
        let a = Allocation {
            duties: Vec::new(),
            outcomes: vec![
                outcome([PickMode::Strict, PickMode::Relaxed], None),
                outcome([PickMode::Relaxed, PickMode::Strict], Some("A")),
            ],
            teachers: Vec::new(),
        };
        assert_eq!(a.relaxed_pick_count(), 2);
        assert_eq!(a.repair_count(), 1);
        assert!(a.outcome_for("E1").is_some());
        assert!(a.new_duties().is_empty());
        assert_eq!(a.roster().duty_count(), 0);
    }
}
