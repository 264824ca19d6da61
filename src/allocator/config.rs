//! Allocator configuration.
//!
//! Every field has a default, so a partial (or empty) JSON document is a
//! valid configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tuning switches for [`DutyAllocator`](super::DutyAllocator).
///
/// # Example
/// ```
/// use u_duty::allocator::AllocatorConfig;
///
/// let config = AllocatorConfig::from_json(r#"{ "time_budget_ms": 5000 }"#).unwrap();
/// assert!(config.allow_relaxed_fallback);
/// assert_eq!(config.time_budget_ms, Some(5000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Validate the snapshot before allocating (default: true).
    pub validate_snapshot: bool,
    /// Fall back to relaxed eligibility when strict search fails (default: true).
    pub allow_relaxed_fallback: bool,
    /// Replace a first invigilator who teaches the exam's subject (default: true).
    pub repair_subject_conflicts: bool,
    /// Wall-clock budget for one run, checked between sessions. `None` = unbounded.
    pub time_budget_ms: Option<u64>,
}

/// Configuration parsing failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not a valid configuration.
    #[error("invalid allocator config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            validate_snapshot: true,
            allow_relaxed_fallback: true,
            repair_subject_conflicts: true,
            time_budget_ms: None,
        }
    }
}

impl AllocatorConfig {
    /// Parses a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Enables or disables snapshot validation.
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_snapshot = enabled;
        self
    }

    /// Enables or disables the relaxed fallback search.
    pub fn with_relaxed_fallback(mut self, enabled: bool) -> Self {
        self.allow_relaxed_fallback = enabled;
        self
    }

    /// Enables or disables subject-conflict repair.
    pub fn with_subject_repair(mut self, enabled: bool) -> Self {
        self.repair_subject_conflicts = enabled;
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_budget_ms(mut self, budget_ms: u64) -> Self {
        self.time_budget_ms = Some(budget_ms);
        self
    }

    /// The budget as a `Duration`.
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }
}
