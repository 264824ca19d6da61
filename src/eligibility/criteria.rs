//! Composable eligibility criteria.
//!
//! A [`Criteria`] is an ordered conjunction of rules. A candidate is
//! eligible iff every rule admits it; rules are evaluated in insertion
//! order and evaluation stops at the first rejection.

use std::sync::Arc;

use super::rules::{DistinctSchool, HasSubjects, NoDoubleBooking, NotOwnSubject};
use super::{EligibilityRule, PairingContext};
use crate::models::{ExamSession, Teacher};

/// An ordered set of eligibility rules.
///
/// # Example
/// ```
/// use u_duty::eligibility::{rules, Criteria};
///
/// let strict = Criteria::strict();
/// assert_eq!(strict.len(), 4);
///
/// let custom = Criteria::new()
///     .with_rule(rules::NotOwnSubject)
///     .with_rule(rules::NoDoubleBooking);
/// assert_eq!(custom.rule_names(), vec!["NOT_OWN_SUBJECT", "NO_DOUBLE_BOOKING"]);
/// ```
#[derive(Clone, Default)]
pub struct Criteria {
    rules: Vec<Arc<dyn EligibilityRule>>,
}

impl Criteria {
    /// Creates an empty criteria set (admits everyone).
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// All four built-in rules.
    pub fn strict() -> Self {
        Self::relaxed().with_rule(DistinctSchool)
    }

    /// Built-in rules without `DISTINCT_SCHOOL`.
    pub fn relaxed() -> Self {
        Self::new()
            .with_rule(HasSubjects)
            .with_rule(NotOwnSubject)
            .with_rule(NoDoubleBooking)
    }

    /// Appends a rule.
    pub fn with_rule<R: EligibilityRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Removes every rule with the given name.
    pub fn without_rule(mut self, name: &str) -> Self {
        self.rules.retain(|r| r.name() != name);
        self
    }

    /// Whether every rule admits the candidate.
    pub fn is_satisfied_by(
        &self,
        candidate: &Teacher,
        session: &ExamSession,
        context: &PairingContext<'_>,
    ) -> bool {
        self.first_rejection(candidate, session, context).is_none()
    }

    /// Name of the first rule that rejects the candidate, if any.
    pub fn first_rejection(
        &self,
        candidate: &Teacher,
        session: &ExamSession,
        context: &PairingContext<'_>,
    ) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|r| !r.admits(candidate, session, context))
            .map(|r| r.name())
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Whether a rule with the given name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.rules.iter().any(|r| r.name() == name)
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are present.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for Criteria {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Criteria")
            .field("rules", &self.rule_names())
            .finish()
    }
}
