//! Error types shared by the engine, the calculation modes and the table loader

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GpaError {
    /// Total credits of a weighted average summed to zero
    #[error("{context}: credits cannot be zero")]
    DivisionByZero { context: &'static str },

    #[error("semester {semester} is out of range (expected 1..={max})")]
    SemesterOutOfRange { semester: u32, max: u32 },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("CSV must include column `{0}` (required: Semester, GPA)")]
    MissingColumn(&'static str),

    #[error("row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("invalid credit scheme: {0}")]
    InvalidScheme(String),

    #[error("no semester data saved yet")]
    EmptyTable,

    #[error("chart rendering failed: {0}")]
    Chart(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl GpaError {
    /// True for the zero-credit failure, which hosts report with its own message
    pub fn is_division_by_zero(&self) -> bool {
        matches!(self, GpaError::DivisionByZero { .. })
    }
}

pub type GpaResult<T> = Result<T, GpaError>;
