//! Invigilation domain models.
//!
//! Provides the core data types for the duty allocation problem: the
//! teachers who can invigilate, the exam sessions that need them, and the
//! duties that pair the two.
//!
//! # Domain Mappings
//!
//! | u-duty | Assignment problem | Typical store record |
//! |--------|--------------------|----------------------|
//! | Teacher | Resource (agent) | Teacher |
//! | ExamSession | Demand (job) | ExamSchedule |
//! | Duty | Assignment | Duty |
//! | DutyRoster | Solution | Duty list |

mod duty;
mod roster;
mod session;
mod teacher;

pub use duty::Duty;
pub use roster::{DutyRoster, Violation, ViolationType};
pub use session::{ExamSession, SessionKey, Shift};
pub use teacher::{DutyRef, Teacher};
