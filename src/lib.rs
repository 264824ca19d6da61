//! Exam invigilation duty allocation for the U-Engine ecosystem.
//!
//! Pairs every exam session with two invigilating teachers, drawn greedily
//! from a shared pool, under hard rules that are never relaxed (no own
//! subject, no double-booking) and one soft rule that is relaxed only when
//! nothing else works (two different home schools).
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Teacher`, `ExamSession`, `Shift`, `Duty`,
//!   `DutyRoster`, `Violation`
//! - **`validation`**: Snapshot integrity checks (duplicate IDs, missing rooms)
//! - **`eligibility`**: Invigilation rules and composable `Criteria`
//! - **`allocator`**: `CandidatePool`, `DutyAllocator`, `DutyKpi`
//! - **`store`**: Snapshot/persistence collaborator traits and `InMemoryStore`
//! - **`run`**: Load → allocate → persist orchestration with run states
//!
//! # Architecture
//!
//! The allocator is synchronous and owns no I/O. Databases, tenants, and
//! HTTP belong to the `store` implementor and the caller.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"

pub mod allocator;
pub mod eligibility;
pub mod models;
pub mod run;
pub mod store;
pub mod validation;
