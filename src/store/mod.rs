//! Snapshot and persistence collaborators.
//!
//! The allocator never talks to a database directly. It reads the teacher
//! and session snapshots through [`SnapshotSource`] and writes duties
//! through [`DutyStore`]. Tenant selection and run serialization belong to
//! the implementor: two concurrent runs against one store race on pool
//! membership and duty history.
//!
//! [`InMemoryStore`] implements both traits and backs the tests.

mod memory;

pub use memory::InMemoryStore;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Duty, DutyRef, ExamSession, Teacher};

/// Identifier assigned to a duty by the store.
pub type DutyId = String;

/// Store failures. Propagated to the caller, never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store refused a write.
    #[error("write rejected: {0}")]
    Rejected(String),

    /// A history append named a teacher the store does not know.
    #[error("unknown teacher: {0}")]
    UnknownTeacher(String),

    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A stored duty with subject and invigilator names resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DutyView {
    /// Stored duty identifier.
    pub id: DutyId,
    /// The duty record.
    pub duty: Duty,
    /// Subject display name (falls back to the subject ID).
    pub subject_name: String,
    /// Invigilator display names, in slot order.
    pub invigilator_names: [String; 2],
}

/// Read side: loads the snapshots for one run.
pub trait SnapshotSource {
    /// Full current teacher roster, with subjects, school, and duty history.
    fn load_teachers(&self) -> Result<Vec<Teacher>, StoreError>;

    /// Full current exam schedule.
    fn load_sessions(&self) -> Result<Vec<ExamSession>, StoreError>;
}

/// Write side: stores duties and teacher duty histories.
pub trait DutyStore {
    /// Stores a duty and returns its identifier.
    fn persist_duty(&mut self, duty: &Duty) -> Result<DutyId, StoreError>;

    /// Appends a stored duty to a teacher's history.
    fn append_duty_to_teacher(
        &mut self,
        teacher_id: &str,
        duty: &DutyRef,
    ) -> Result<(), StoreError>;

    /// Every stored duty, names resolved.
    fn list_all_duties(&self) -> Result<Vec<DutyView>, StoreError>;
}
