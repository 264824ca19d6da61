//! Duty allocation: candidate pool, greedy allocator, and roster KPIs.
//!
//! # Algorithm
//!
//! `DutyAllocator` staffs each exam session with two invigilators taken
//! from a shared pool. Each pick tries the strict criteria first and falls
//! back to the relaxed criteria; picked teachers leave the pool for the
//! rest of the run. It is a first-fit heuristic: fast and predictable, but
//! not optimal.
//!
//! # KPI
//!
//! `DutyKpi` summarizes a roster: utilization, load spread, and how many
//! duties pair two teachers from one school.

mod config;
mod error;
mod greedy;
mod kpi;
mod outcome;
mod pool;

pub use config::{AllocatorConfig, ConfigError};
pub use error::AllocationError;
pub use greedy::DutyAllocator;
pub use kpi::DutyKpi;
pub use outcome::{Allocation, PickMode, SessionOutcome};
pub use pool::CandidatePool;

use crate::models::{Duty, ExamSession, Teacher};

/// Allocates duties with the default allocator and an in-memory store.
///
/// Returns only the duties created for `sessions`, in session order.
pub fn allocate(
    teachers: &[Teacher],
    sessions: &[ExamSession],
) -> Result<Vec<Duty>, AllocationError> {
    let allocation = DutyAllocator::new().plan(teachers, sessions)?;
    Ok(allocation.new_duties().into_iter().cloned().collect())
}
