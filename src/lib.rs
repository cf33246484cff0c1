//! GPA Calculator - credit-weighted semester GPA and CGPA arithmetic
//!
//! This library provides:
//! - The arithmetic engine (weighted averages, CGPA update, back-calculation)
//! - Calculation modes over a caller-owned semester table
//! - Credit schemes, CSV import/export and a GPA trend chart

pub mod error;
pub mod engine;
pub mod scheme;
pub mod table;
pub mod config;
pub mod calculator;
pub mod chart;

// Re-export commonly used types
pub use error::{GpaError, GpaResult};
pub use engine::{back_calculate_current_gpa, cumulative_gpa, update_cgpa, weighted_semester_gpa};
pub use scheme::CreditScheme;
pub use table::{SemesterRecord, SemesterTable, TableSummary};
pub use config::CalculatorConfig;
pub use calculator::{Calculator, FinderInput, SemesterEntry, Subject};
