//! Credit-weighted averages
//!
//! Semester GPA (subjects weighted by credit hours) and CGPA (semesters weighted
//! by semester credits) are the same computation, so both go through
//! [`weighted_average`].

use crate::error::{GpaError, GpaResult};

/// Running sums of a weighted average
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedTotals {
    /// Sum of value * credits ("quality points")
    pub quality_points: f64,
    /// Sum of credits
    pub credits: u64,
}

impl WeightedTotals {
    /// Accumulate (value, credits) pairs
    pub fn from_pairs(pairs: &[(f64, u32)]) -> Self {
        pairs.iter().fold(Self::default(), |mut acc, &(value, credits)| {
            acc.quality_points += value * credits as f64;
            acc.credits += credits as u64;
            acc
        })
    }

    /// Weighted mean, failing when no credits were accumulated
    pub fn average(&self, context: &'static str) -> GpaResult<f64> {
        if self.credits == 0 {
            return Err(GpaError::DivisionByZero { context });
        }
        Ok(self.quality_points / self.credits as f64)
    }
}

/// Sum(value * credits) / Sum(credits)
///
/// `context` names the quantity being averaged and ends up in the
/// `DivisionByZero` message.
pub fn weighted_average(pairs: &[(f64, u32)], context: &'static str) -> GpaResult<f64> {
    WeightedTotals::from_pairs(pairs).average(context)
}

/// Semester GPA from (grade point, credit hours) per subject
pub fn weighted_semester_gpa(pairs: &[(f64, u32)]) -> GpaResult<f64> {
    weighted_average(pairs, "semester GPA")
}

/// CGPA from (semester GPA, semester credits) per semester
pub fn cumulative_gpa(pairs: &[(f64, u32)]) -> GpaResult<f64> {
    weighted_average(pairs, "CGPA")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_semester_gpa_example() {
        let gpa = weighted_semester_gpa(&[(4.0, 3), (3.0, 3), (3.7, 4)]).unwrap();
        assert_relative_eq!(gpa, 3.58, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_credits_is_division_by_zero() {
        let err = weighted_semester_gpa(&[(4.0, 0), (3.0, 0)]).unwrap_err();
        assert!(err.is_division_by_zero());

        let err = cumulative_gpa(&[]).unwrap_err();
        assert!(err.is_division_by_zero());
    }

    #[test]
    fn test_zero_credit_entries_are_ignored() {
        // A zero-credit subject contributes nothing to either sum
        let with = weighted_semester_gpa(&[(4.0, 3), (0.0, 0), (2.0, 3)]).unwrap();
        let without = weighted_semester_gpa(&[(4.0, 3), (2.0, 3)]).unwrap();
        assert_eq!(with, without);
        assert_relative_eq!(with, 3.0);
    }

    #[test]
    fn test_result_bounded_by_inputs() {
        let grade_points = [0.0, 1.3, 2.0, 2.7, 3.3, 3.7, 4.0];
        for (i, &a) in grade_points.iter().enumerate() {
            for &b in &grade_points[i..] {
                for ca in 0..5u32 {
                    for cb in 0..5u32 {
                        if ca + cb == 0 {
                            continue;
                        }
                        let gpa = weighted_semester_gpa(&[(a, ca), (b, cb)]).unwrap();
                        let lo = a.min(b);
                        let hi = a.max(b);
                        assert!(
                            gpa >= lo - 1e-12 && gpa <= hi + 1e-12,
                            "{} outside [{}, {}] for credits {}/{}",
                            gpa, lo, hi, ca, cb
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_semester_and_cumulative_share_formula() {
        let inputs: [&[(f64, u32)]; 3] = [
            &[(3.2, 16), (3.5, 16), (2.9, 17)],
            &[(4.0, 18)],
            &[(1.0, 1), (2.0, 2), (3.0, 3), (4.0, 4)],
        ];
        for pairs in inputs {
            assert_eq!(
                weighted_semester_gpa(pairs).unwrap(),
                cumulative_gpa(pairs).unwrap()
            );
        }
    }

    #[test]
    fn test_totals() {
        let totals = WeightedTotals::from_pairs(&[(4.0, 3), (3.0, 3), (3.7, 4)]);
        assert_eq!(totals.credits, 10);
        assert_relative_eq!(totals.quality_points, 35.8, epsilon = 1e-12);
    }
}
