//! CGPA update and back-calculation
//!
//! Both functions are rearrangements of the same equation:
//!
//! ```text
//! new_cgpa * (prev_credits + current_credits) = prev_cgpa * prev_credits + gpa * current_credits
//! ```

use crate::error::{GpaError, GpaResult};

/// Current-semester GPA implied by the CGPA before and after the semester
///
/// `(new_cgpa * (prev_credits + current_credits) - prev_cgpa * prev_credits) / current_credits`
///
/// The result is not clamped to any grading scale: inconsistent inputs can
/// produce values above the scale maximum or below zero, and those are returned
/// as-is.
pub fn back_calculate_current_gpa(
    prev_cgpa: f64,
    prev_credits: u32,
    new_cgpa: f64,
    current_credits: u32,
) -> GpaResult<f64> {
    if current_credits == 0 {
        return Err(GpaError::DivisionByZero { context: "current semester" });
    }
    let prev_credits = prev_credits as f64;
    let current_credits = current_credits as f64;

    let numerator = new_cgpa * (prev_credits + current_credits) - prev_cgpa * prev_credits;
    Ok(numerator / current_credits)
}

/// CGPA after adding one semester to a previous cumulative standing
///
/// With `prev_credits == 0` this reduces to `new_semester_gpa`.
pub fn update_cgpa(
    prev_cgpa: f64,
    prev_credits: u32,
    new_semester_gpa: f64,
    new_semester_credits: u32,
) -> GpaResult<f64> {
    let total_credits = prev_credits as u64 + new_semester_credits as u64;
    if total_credits == 0 {
        return Err(GpaError::DivisionByZero { context: "updated CGPA" });
    }

    let quality_points =
        prev_cgpa * prev_credits as f64 + new_semester_gpa * new_semester_credits as f64;
    Ok(quality_points / total_credits as f64)
}
