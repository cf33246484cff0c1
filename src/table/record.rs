//! Semester records and the caller-owned table that holds them

use crate::engine::{cumulative_gpa, WeightedTotals};
use crate::error::{GpaError, GpaResult};
use serde::{Deserialize, Serialize};

/// GPA and credit load of one completed semester
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SemesterRecord {
    #[serde(rename = "Semester")]
    pub semester: u32,
    #[serde(rename = "GPA")]
    pub gpa: f64,
    #[serde(rename = "Credits")]
    pub credits: u32,
}

impl SemesterRecord {
    pub fn new(semester: u32, gpa: f64, credits: u32) -> Self {
        Self { semester, gpa, credits }
    }
}

/// CGPA over everything saved in a table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableSummary {
    pub cgpa: f64,
    pub total_credits: u64,
    pub semesters: usize,
}

/// Semester records in insertion order
///
/// The table belongs to whoever hosts the calculator (a CLI session file, a
/// request payload); calculation modes only receive it by reference.
/// Semester numbers are not required to be unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SemesterTable {
    records: Vec<SemesterRecord>,
}

impl SemesterTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<SemesterRecord>) -> Self {
        Self { records }
    }

    /// Append one record
    pub fn push(&mut self, record: SemesterRecord) {
        self.records.push(record);
    }

    /// Replace all records (import, CGPA-from-semesters mode)
    pub fn replace(&mut self, records: Vec<SemesterRecord>) {
        self.records = records;
    }

    /// Drop all records
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[SemesterRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records ordered by semester; ties keep insertion order
    pub fn sorted_by_semester(&self) -> Vec<SemesterRecord> {
        let mut sorted = self.records.clone();
        sorted.sort_by_key(|r| r.semester);
        sorted
    }

    /// CGPA of the saved records
    pub fn cumulative(&self) -> GpaResult<TableSummary> {
        if self.records.is_empty() {
            return Err(GpaError::EmptyTable);
        }
        let pairs: Vec<(f64, u32)> = self.records.iter().map(|r| (r.gpa, r.credits)).collect();
        let cgpa = cumulative_gpa(&pairs)?;

        Ok(TableSummary {
            cgpa,
            total_credits: WeightedTotals::from_pairs(&pairs).credits,
            semesters: self.records.len(),
        })
    }

    /// (semester, GPA) points for the trend chart
    pub fn trend(&self) -> Vec<(u32, f64)> {
        self.sorted_by_semester()
            .into_iter()
            .map(|r| (r.semester, r.gpa))
            .collect()
    }
}
