//! The week-index to cutoff-date table used for eligibility decisions.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// Static mapping from course week to the signoff cutoff date.
///
/// A signoff dated on the cutoff itself still earns points; the comparison
/// is inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeadlineTable(BTreeMap<u32, NaiveDate>);

impl DeadlineTable {
    pub fn new(cutoffs: BTreeMap<u32, NaiveDate>) -> Self {
        Self(cutoffs)
    }

    /// Cutoff date for a course week, if one is configured.
    pub fn cutoff(&self, week: u32) -> Option<NaiveDate> {
        self.0.get(&week).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for DeadlineTable {
    /// Deadlines of the 2022/2023 course edition.
    fn default() -> Self {
        Self(BTreeMap::from([
            (1, date(2022, 11, 21)),
            (2, date(2022, 11, 28)),
            (3, date(2022, 12, 5)),
            (4, date(2022, 12, 12)),
            (5, date(2022, 12, 19)),
            (6, date(2023, 1, 9)),
            (7, date(2023, 1, 16)),
        ]))
    }
}
