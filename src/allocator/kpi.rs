//! Roster quality metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Duty count | Duties in the roster |
//! | Teachers used | Distinct invigilators |
//! | Idle teachers | Snapshot teachers with no duty |
//! | Utilization | Teachers used / snapshot size |
//! | Same-school pairs | Duties whose invigilators share a school |
//! | Max load | Most duties held by one teacher |

use std::collections::HashMap;

use crate::models::{DutyRoster, Shift, Teacher};

/// Roster performance indicators.
#[derive(Debug, Clone)]
pub struct DutyKpi {
    /// Number of duties.
    pub duty_count: usize,
    /// Distinct teachers holding a duty.
    pub teachers_used: usize,
    /// Snapshot teachers holding no duty.
    pub idle_teachers: usize,
    /// Fraction of the snapshot holding a duty (0.0..1.0).
    pub utilization: f64,
    /// Duties whose two invigilators share a home school.
    pub same_school_pairs: usize,
    /// Largest number of duties held by one teacher.
    pub max_load: usize,
    /// Invigilator slots filled per school.
    pub load_by_school: HashMap<String, usize>,
    /// Duties per shift; every shift is present, unused ones at zero.
    pub duties_by_shift: HashMap<Shift, usize>,
}

impl DutyKpi {
    /// Computes KPIs from a roster and the teacher snapshot.
    ///
    /// Invigilators missing from `teachers` count toward `teachers_used`
    /// but not toward any school.
    pub fn calculate(roster: &DutyRoster, teachers: &[Teacher]) -> Self {
        let by_id: HashMap<&str, &Teacher> =
            teachers.iter().map(|t| (t.id.as_str(), t)).collect();
        let load = roster.load_by_teacher();

        let mut same_school_pairs = 0;
        let mut load_by_school: HashMap<String, usize> = HashMap::new();
        let mut duties_by_shift: HashMap<Shift, usize> =
            Shift::ALL.iter().map(|shift| (*shift, 0)).collect();

        for duty in &roster.duties {
            *duties_by_shift.entry(duty.shift).or_insert(0) += 1;

            let schools: Vec<&str> = duty
                .invigilators
                .iter()
                .filter_map(|id| by_id.get(id.as_str()).map(|t| t.school.as_str()))
                .collect();
            for school in &schools {
                *load_by_school.entry((*school).to_string()).or_insert(0) += 1;
            }
            if schools.len() == 2 && schools[0] == schools[1] {
                same_school_pairs += 1;
            }
        }

        let teachers_used = load.len();
        let idle_teachers = teachers
            .iter()
            .filter(|t| !load.contains_key(&t.id))
            .count();
        let utilization = if teachers.is_empty() {
            0.0
        } else {
            (teachers.len() - idle_teachers) as f64 / teachers.len() as f64
        };

        Self {
            duty_count: roster.duty_count(),
            teachers_used,
            idle_teachers,
            utilization,
            same_school_pairs,
            max_load: load.values().copied().max().unwrap_or(0),
            load_by_school,
            duties_by_shift,
        }
    }

    /// Whether the roster stays within the given quality thresholds.
    pub fn meets_thresholds(&self, max_same_school_pairs: usize, max_load: usize) -> bool {
        self.same_school_pairs <= max_same_school_pairs && self.max_load <= max_load
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Duty;
    use chrono::NaiveDate;

    fn duty(shift: Shift, a: &str, b: &str) -> Duty {
        Duty {
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            shift,
            subject: "Art".into(),
            room: "R1".into(),
            invigilators: [a.into(), b.into()],
            standard: None,
        }
    }

    fn teachers() -> Vec<Teacher> {
        vec![
            Teacher::new("A", "X").with_subject("Math"),
            Teacher::new("B", "X").with_subject("Eng"),
            Teacher::new("C", "Y").with_subject("Eng"),
            Teacher::new("D", "Y").with_subject("Math"),
        ]
    }

    #[test]
    fn test_kpi_basic() {
        let roster = DutyRoster::from_duties(vec![
            duty(Shift::Morning, "B", "C"),
            duty(Shift::Evening, "A", "B"),
        ]);
        let kpi = DutyKpi::calculate(&roster, &teachers());

        assert_eq!(kpi.duty_count, 2);
        assert_eq!(kpi.teachers_used, 3);
        assert_eq!(kpi.idle_teachers, 1);
        assert!((kpi.utilization - 0.75).abs() < 1e-10);
        assert_eq!(kpi.same_school_pairs, 1);
        assert_eq!(kpi.max_load, 2);
        assert_eq!(kpi.load_by_school["X"], 3);
        assert_eq!(kpi.load_by_school["Y"], 1);
        assert_eq!(kpi.duties_by_shift[&Shift::Morning], 1);
        assert_eq!(kpi.duties_by_shift[&Shift::Evening], 1);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = DutyKpi::calculate(&DutyRoster::new(), &[]);
        assert_eq!(kpi.duty_count, 0);
        assert_eq!(kpi.max_load, 0);
        assert!((kpi.utilization - 0.0).abs() < 1e-10);
        assert_eq!(kpi.duties_by_shift.len(), Shift::ALL.len());
        assert!(kpi.duties_by_shift.values().all(|n| *n == 0));
    }

    #[test]
    fn test_kpi_unused_shift_reported() {
        let roster = DutyRoster::from_duties(vec![duty(Shift::Morning, "B", "C")]);
        let kpi = DutyKpi::calculate(&roster, &teachers());
        assert_eq!(kpi.duties_by_shift[&Shift::Morning], 1);
        assert_eq!(kpi.duties_by_shift[&Shift::Evening], 0);
    }

    #[test]
    fn test_kpi_unknown_invigilator() {
        let roster = DutyRoster::from_duties(vec![duty(Shift::Morning, "A", "Z")]);
        let kpi = DutyKpi::calculate(&roster, &teachers());
        assert_eq!(kpi.teachers_used, 2);
        assert_eq!(kpi.same_school_pairs, 0);
        assert_eq!(kpi.load_by_school.values().sum::<usize>(), 1);
    }

    #[test]
    fn test_meets_thresholds() {
        let roster = DutyRoster::from_duties(vec![duty(Shift::Morning, "A", "B")]);
        let kpi = DutyKpi::calculate(&roster, &teachers());
        assert!(kpi.meets_thresholds(1, 1));
        assert!(!kpi.meets_thresholds(0, 1));
    }
}
