//! End-to-end allocation run: load, allocate, persist.
//!
//! # States
//!
//! ```text
//! Pending → Loading → Allocating → Committed
//!                 ↘            ↘
//!                  Failed ←─────┘
//! ```
//!
//! A failed run may leave a prefix of valid duties in the store;
//! [`RunState::Failed`] reports how many.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::allocator::{Allocation, AllocationError, DutyAllocator};
use crate::models::{Duty, DutyRef};
use crate::store::{DutyId, DutyStore, DutyView, SnapshotSource, StoreError};

/// Lifecycle state of an [`AllocationRun`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Not started.
    Pending,
    /// Reading the teacher and session snapshots.
    Loading,
    /// Staffing sessions.
    Allocating,
    /// Every session staffed.
    Committed {
        /// Duties stored by this run.
        duties: usize,
    },
    /// Stopped at the first failure.
    Failed {
        /// Duties stored by this run before the failure.
        committed: usize,
        /// Error description.
        reason: String,
    },
}

impl RunState {
    /// Whether the run has finished, successfully or not.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Committed { .. } | RunState::Failed { .. })
    }
}

/// One allocation run against a tenant's store.
///
/// Runs against the same store must not overlap; the caller serializes them.
///
/// # Example
/// ```
/// use u_duty::allocator::DutyAllocator;
/// use u_duty::models::{ExamSession, Shift, Teacher};
/// use u_duty::run::{AllocationRun, RunState};
/// use u_duty::store::InMemoryStore;
/// use chrono::NaiveDate;
///
/// let mut store = InMemoryStore::new()
///     .with_teachers(vec![
///         Teacher::new("B", "X").with_subject("Eng"),
///         Teacher::new("C", "Y").with_subject("Eng"),
///     ])
///     .with_sessions(vec![ExamSession::new(
///         "E1",
///         "Math",
///         NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
///         Shift::Morning,
///     )
///     .with_room("R1")]);
///
/// let mut run = AllocationRun::new(DutyAllocator::new());
/// run.execute(&mut store).unwrap();
/// assert_eq!(run.state(), &RunState::Committed { duties: 1 });
/// ```
#[derive(Debug, Clone)]
pub struct AllocationRun {
    allocator: DutyAllocator,
    state: RunState,
}

impl AllocationRun {
    /// Creates a pending run.
    pub fn new(allocator: DutyAllocator) -> Self {
        Self {
            allocator,
            state: RunState::Pending,
        }
    }

    /// Current state.
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Loads the snapshots from `store`, allocates, and writes back.
    pub fn execute<S>(&mut self, store: &mut S) -> Result<Allocation, AllocationError>
    where
        S: SnapshotSource + DutyStore,
    {
        self.state = RunState::Loading;
        let snapshot = store
            .load_teachers()
            .and_then(|teachers| Ok((teachers, store.load_sessions()?)));
        let (teachers, sessions) = match snapshot {
            Ok(loaded) => loaded,
            Err(e) => return Err(self.fail(0, e.into())),
        };

        self.state = RunState::Allocating;
        info!(
            teachers = teachers.len(),
            sessions = sessions.len(),
            "snapshot loaded"
        );

        let mut tracked = CountingStore {
            inner: store,
            committed: 0,
        };
        match self.allocator.allocate(&teachers, &sessions, &mut tracked) {
            Ok(allocation) => {
                self.state = RunState::Committed {
                    duties: tracked.committed,
                };
                Ok(allocation)
            }
            Err(e) => Err(self.fail(tracked.committed, e)),
        }
    }

    fn fail(&mut self, committed: usize, err: AllocationError) -> AllocationError {
        error!(committed, error = %err, "allocation run failed");
        self.state = RunState::Failed {
            committed,
            reason: err.to_string(),
        };
        err
    }
}

/// Counts duties stored through it.
struct CountingStore<'a, S: ?Sized> {
    inner: &'a mut S,
    committed: usize,
}

impl<S: DutyStore + ?Sized> DutyStore for CountingStore<'_, S> {
    fn persist_duty(&mut self, duty: &Duty) -> Result<DutyId, StoreError> {
        let id = self.inner.persist_duty(duty)?;
        self.committed += 1;
        Ok(id)
    }

    fn append_duty_to_teacher(
        &mut self,
        teacher_id: &str,
        duty: &DutyRef,
    ) -> Result<(), StoreError> {
        self.inner.append_duty_to_teacher(teacher_id, duty)
    }

    fn list_all_duties(&self) -> Result<Vec<DutyView>, StoreError> {
        self.inner.list_all_duties()
    }
}
