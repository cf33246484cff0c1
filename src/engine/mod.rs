//! GPA arithmetic engine
//!
//! Pure functions over already-validated numbers. The only failure the engine
//! reports is a zero credit total in a weighted-average denominator; every other
//! check belongs to the caller (see [`crate::calculator`]).

mod weighted;
mod cumulative;

pub use weighted::{weighted_average, weighted_semester_gpa, cumulative_gpa, WeightedTotals};
pub use cumulative::{back_calculate_current_gpa, update_cgpa};
