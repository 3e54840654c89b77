//! The per-student point ledger.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use crate::models::Track;

/// One row of the final report, keyed by student number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    pub student_number: String,
    pub programming_points: u32,
    pub design_points: u32,
}

/// Accumulates points per student.
///
/// Owned and mutated by the harvest controller only. Each `increment` call
/// corresponds to exactly one (student, assignment) eligibility decision;
/// at-most-once per pair is the caller's contract.
#[derive(Debug)]
pub struct PointsLedger {
    entries: BTreeMap<String, LedgerEntry>,
    points_per_assignment: u32,
}

impl PointsLedger {
    pub fn new(points_per_assignment: u32) -> Self {
        Self {
            entries: BTreeMap::new(),
            points_per_assignment,
        }
    }

    /// Award points for one eligible signoff, creating a zeroed entry on the
    /// student's first award.
    pub fn increment(&mut self, student_number: &str, track: Track) {
        let step = self.points_per_assignment;
        let entry = self
            .entries
            .entry(student_number.to_string())
            .or_insert_with(|| LedgerEntry {
                student_number: student_number.to_string(),
                programming_points: 0,
                design_points: 0,
            });

        match track {
            Track::Programming => entry.programming_points += step,
            Track::Design => entry.design_points += step,
        }
    }

    /// Discard the entry of an interrupted student. A student is either
    /// fully counted or not counted at all; this must run before the student
    /// is reprocessed.
    pub fn remove_entry(&mut self, student_number: &str) {
        if self.entries.remove(student_number).is_none() {
            warn!(student = student_number, "no ledger entry to roll back");
        }
    }

    pub fn contains(&self, student_number: &str) -> bool {
        self.entries.contains_key(student_number)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in student-number order; does not mutate.
    pub fn snapshot(&self) -> Vec<LedgerEntry> {
        self.entries.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_increment_creates_a_zeroed_entry() {
        let mut ledger = PointsLedger::new(1);
        ledger.increment("s1001234", Track::Programming);

        let snapshot = ledger.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].student_number, "s1001234");
        assert_eq!(snapshot[0].programming_points, 1);
        assert_eq!(snapshot[0].design_points, 0);
    }

    #[test]
    fn test_increments_accumulate_per_track() {
        let mut ledger = PointsLedger::new(2);
        ledger.increment("s1001234", Track::Programming);
        ledger.increment("s1001234", Track::Programming);
        ledger.increment("s1001234", Track::Design);

        let snapshot = ledger.snapshot();
        assert_eq!(snapshot[0].programming_points, 4);
        assert_eq!(snapshot[0].design_points, 2);
    }

    #[test]
    fn test_one_entry_per_student_number() {
        let mut ledger = PointsLedger::new(1);
        for _ in 0..5 {
            ledger.increment("s1001234", Track::Programming);
        }
        ledger.increment("s2002345", Track::Design);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_remove_entry_discards_partial_counts() {
        let mut ledger = PointsLedger::new(1);
        ledger.increment("s1001234", Track::Programming);
        ledger.remove_entry("s1001234");
        assert!(!ledger.contains("s1001234"));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_remove_of_absent_entry_is_a_reported_noop() {
        let mut ledger = PointsLedger::new(1);
        ledger.remove_entry("s9999999");
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_snapshot_is_ordered_by_student_number() {
        let mut ledger = PointsLedger::new(1);
        ledger.increment("s3000000", Track::Programming);
        ledger.increment("s1000000", Track::Programming);
        ledger.increment("s2000000", Track::Programming);

        let numbers: Vec<_> = ledger
            .snapshot()
            .into_iter()
            .map(|entry| entry.student_number)
            .collect();
        assert_eq!(numbers, vec!["s1000000", "s2000000", "s3000000"]);
    }
}
