//! Calculation modes
//!
//! Each mode validates what the user typed, runs the engine, and records the
//! result in a [`SemesterTable`] owned by the caller. Nothing here holds
//! session state between calls.

use crate::config::CalculatorConfig;
use crate::engine::{
    back_calculate_current_gpa, update_cgpa, weighted_semester_gpa, WeightedTotals,
};
use crate::error::{GpaError, GpaResult};
use crate::scheme::CreditScheme;
use crate::table::{SemesterRecord, SemesterTable};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Upper end of the usual grading scale; results above it are only logged
pub const CONVENTIONAL_SCALE_MAX: f64 = 4.0;

/// One subject of a transcript
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub grade_point: f64,
    pub credits: u32,
}

impl Subject {
    pub fn new(grade_point: f64, credits: u32) -> Self {
        Self { grade_point, credits }
    }
}

/// GPA and credits of one completed semester, as entered by the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SemesterEntry {
    pub gpa: f64,
    pub credits: u32,
}

impl SemesterEntry {
    pub fn new(gpa: f64, credits: u32) -> Self {
        Self { gpa, credits }
    }
}

/// How the current-semester GPA finder learns about previous semesters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum FinderInput {
    /// Previous CGPA known; previous credits come from the credit scheme
    FromCgpa { prev_cgpa: f64, new_cgpa: f64 },
    /// Every previous semester GPA known; previous CGPA is derived from them
    FromPreviousGpas {
        previous: Vec<SemesterEntry>,
        new_cgpa: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SemesterOutcome {
    pub semester: u32,
    pub gpa: f64,
    pub total_credits: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CgpaOutcome {
    pub semesters: u32,
    pub cgpa: f64,
    pub total_credits: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinderOutcome {
    pub semester: u32,
    pub current_gpa: f64,
    pub prev_cgpa: f64,
    pub prev_credits: u32,
    pub current_credits: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OneStepOutcome {
    pub semester: u32,
    pub semester_gpa: f64,
    pub cgpa: f64,
    pub subject_credits: u32,
    pub semester_credits: u32,
}

/// Calculation modes bound to one configuration
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    config: CalculatorConfig,
}

impl Calculator {
    pub fn new(config: CalculatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn scheme(&self) -> &CreditScheme {
        &self.config.credit_scheme
    }

    /// Semester GPA from subject grade points; appends the semester to `table`
    pub fn semester_gpa(
        &self,
        table: &mut SemesterTable,
        semester: u32,
        subjects: &[Subject],
    ) -> GpaResult<SemesterOutcome> {
        self.check_semester(semester)?;
        let (gpa, total_credits) = self.subject_gpa(subjects)?;

        table.push(SemesterRecord::new(semester, gpa, total_credits));
        info!("Saved semester {} GPA {} ({} credits)", semester, gpa, total_credits);

        Ok(SemesterOutcome {
            semester,
            gpa,
            total_credits,
        })
    }

    /// CGPA over semesters 1..=n; replaces `table` with those semesters
    ///
    /// On failure the table is left untouched.
    pub fn cgpa_from_semesters(
        &self,
        table: &mut SemesterTable,
        semesters: &[SemesterEntry],
    ) -> GpaResult<CgpaOutcome> {
        if semesters.is_empty() {
            return Err(GpaError::InvalidInput("enter at least one semester".to_string()));
        }
        self.check_semester(semesters.len() as u32)?;
        for (idx, entry) in semesters.iter().enumerate() {
            check_gpa(&format!("GPA of semester {}", idx + 1), entry.gpa)?;
        }

        let pairs: Vec<(f64, u32)> = semesters.iter().map(|s| (s.gpa, s.credits)).collect();
        let totals = WeightedTotals::from_pairs(&pairs);
        let cgpa = totals.average("CGPA")?;

        let records = semesters
            .iter()
            .enumerate()
            .map(|(idx, s)| SemesterRecord::new(idx as u32 + 1, s.gpa, s.credits))
            .collect();
        table.replace(records);
        info!("Replaced table with {} semesters, CGPA {}", semesters.len(), cgpa);

        Ok(CgpaOutcome {
            semesters: semesters.len() as u32,
            cgpa,
            total_credits: totals.credits,
        })
    }

    /// Back-calculate the GPA of `semester` from cumulative figures
    ///
    /// Current-semester credits come from the credit scheme. For semester 1
    /// there are no previous credits and the result equals the new CGPA.
    pub fn find_current_gpa(&self, semester: u32, input: &FinderInput) -> GpaResult<FinderOutcome> {
        let current_credits = self.check_semester(semester)?;

        let (prev_cgpa, prev_credits, new_cgpa) = match input {
            FinderInput::FromCgpa { prev_cgpa, new_cgpa } => {
                check_gpa("previous CGPA", *prev_cgpa)?;
                (*prev_cgpa, self.scheme().credits_before(semester), *new_cgpa)
            }
            FinderInput::FromPreviousGpas { previous, new_cgpa } => {
                if previous.len() as u32 != semester - 1 {
                    return Err(GpaError::InvalidInput(format!(
                        "semester {} needs {} previous semester GPAs, got {}",
                        semester,
                        semester - 1,
                        previous.len()
                    )));
                }
                for (idx, entry) in previous.iter().enumerate() {
                    check_gpa(&format!("GPA of semester {}", idx + 1), entry.gpa)?;
                }

                let pairs: Vec<(f64, u32)> = previous.iter().map(|s| (s.gpa, s.credits)).collect();
                let totals = WeightedTotals::from_pairs(&pairs);
                let prev_cgpa = if previous.is_empty() {
                    0.0
                } else {
                    totals.average("previous semesters")?
                };
                let prev_credits = u32::try_from(totals.credits).map_err(|_| {
                    GpaError::InvalidInput("previous credits overflow".to_string())
                })?;
                debug!("Derived previous CGPA {} over {} credits", prev_cgpa, prev_credits);
                (prev_cgpa, prev_credits, *new_cgpa)
            }
        };
        check_gpa("new CGPA", new_cgpa)?;

        let current_gpa =
            back_calculate_current_gpa(prev_cgpa, prev_credits, new_cgpa, current_credits)?;
        if !(0.0..=CONVENTIONAL_SCALE_MAX).contains(&current_gpa) {
            warn!(
                "Back-calculated GPA {} for semester {} is outside 0..={}; check the CGPA inputs",
                current_gpa, semester, CONVENTIONAL_SCALE_MAX
            );
        }

        Ok(FinderOutcome {
            semester,
            current_gpa,
            prev_cgpa,
            prev_credits,
            current_credits,
        })
    }

    /// Semester GPA from subjects, then the CGPA updated with it
    ///
    /// The semester is weighted by its credit-scheme load. `prev_cgpa` is
    /// required from semester 2 on and ignored for semester 1. The semester is
    /// appended to `table`.
    pub fn one_step(
        &self,
        table: &mut SemesterTable,
        semester: u32,
        subjects: &[Subject],
        prev_cgpa: Option<f64>,
    ) -> GpaResult<OneStepOutcome> {
        let semester_credits = self.check_semester(semester)?;
        let (semester_gpa, subject_credits) = self.subject_gpa(subjects)?;

        let prev_cgpa = match (semester, prev_cgpa) {
            (1, _) => 0.0,
            (_, Some(prev)) => {
                check_gpa("previous CGPA", prev)?;
                prev
            }
            (_, None) => {
                return Err(GpaError::InvalidInput(format!(
                    "semester {} needs the previous CGPA",
                    semester
                )))
            }
        };
        let prev_credits = self.scheme().credits_before(semester);
        let cgpa = update_cgpa(prev_cgpa, prev_credits, semester_gpa, semester_credits)?;

        table.push(SemesterRecord::new(semester, semester_gpa, semester_credits));
        info!(
            "Saved semester {} GPA {}, CGPA now {}",
            semester, semester_gpa, cgpa
        );

        Ok(OneStepOutcome {
            semester,
            semester_gpa,
            cgpa,
            subject_credits,
            semester_credits,
        })
    }

    /// Pair GPAs with credits, taking missing credits from the scheme
    ///
    /// `credits[i]` overrides the scheme for semester `i + 1`. More credits
    /// than GPAs is an input error.
    pub fn semester_entries(&self, gpas: &[f64], credits: &[u32]) -> GpaResult<Vec<SemesterEntry>> {
        if credits.len() > gpas.len() {
            return Err(GpaError::InvalidInput(format!(
                "{} credit values given for {} semester GPAs",
                credits.len(),
                gpas.len()
            )));
        }
        let pairs: Vec<(f64, Option<u32>)> = gpas
            .iter()
            .enumerate()
            .map(|(idx, &gpa)| (gpa, credits.get(idx).copied()))
            .collect();
        self.semester_entries_from(&pairs)
    }

    /// Semester `i + 1` takes `pairs[i]`; `None` credits come from the scheme
    pub fn semester_entries_from(&self, pairs: &[(f64, Option<u32>)]) -> GpaResult<Vec<SemesterEntry>> {
        pairs
            .iter()
            .enumerate()
            .map(|(idx, &(gpa, credits))| {
                let credits = match credits {
                    Some(c) => c,
                    None => self.check_semester(idx as u32 + 1)?,
                };
                Ok(SemesterEntry::new(gpa, credits))
            })
            .collect()
    }

    /// Validate a semester index, returning its scheme credits
    fn check_semester(&self, semester: u32) -> GpaResult<u32> {
        self.scheme()
            .credits_for(semester)
            .ok_or(GpaError::SemesterOutOfRange {
                semester,
                max: self.scheme().max_semesters(),
            })
    }

    fn subject_gpa(&self, subjects: &[Subject]) -> GpaResult<(f64, u32)> {
        if subjects.is_empty() {
            return Err(GpaError::InvalidInput("enter at least one subject".to_string()));
        }
        for (idx, subject) in subjects.iter().enumerate() {
            check_gpa(&format!("grade point of subject {}", idx + 1), subject.grade_point)?;
        }

        let pairs: Vec<(f64, u32)> = subjects.iter().map(|s| (s.grade_point, s.credits)).collect();
        let gpa = weighted_semester_gpa(&pairs)?;
        let total = u32::try_from(WeightedTotals::from_pairs(&pairs).credits)
            .map_err(|_| GpaError::InvalidInput("subject credits overflow".to_string()))?;
        debug!("Semester GPA {} over {} subject credits", gpa, total);
        Ok((gpa, total))
    }
}

fn check_gpa(what: &str, value: f64) -> GpaResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GpaError::InvalidInput(format!(
            "{} must be a non-negative number, got {}",
            what, value
        )))
    }
}
