//! Calculator configuration
//!
//! Environment variables:
//!   GPA_CREDIT_SCHEME      comma-separated credits per semester (e.g. `16,16,17,18`)
//!   GPA_SCHEME_FILE        CSV file with `Semester,Credits` rows, wins over GPA_CREDIT_SCHEME
//!   GPA_DISPLAY_PRECISION  decimal places for printed GPAs (default 4)

use crate::error::{GpaError, GpaResult};
use crate::scheme::CreditScheme;
use std::env;
use std::path::Path;

/// Decimal places used when displaying GPAs
pub const DEFAULT_DISPLAY_PRECISION: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorConfig {
    pub credit_scheme: CreditScheme,
    pub display_precision: usize,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            credit_scheme: CreditScheme::default(),
            display_precision: DEFAULT_DISPLAY_PRECISION,
        }
    }
}

impl CalculatorConfig {
    /// Read configuration from the environment, defaulting anything unset
    pub fn from_env() -> GpaResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source
    pub fn from_lookup<F>(lookup: F) -> GpaResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credit_scheme = if let Some(path) = lookup("GPA_SCHEME_FILE") {
            CreditScheme::from_csv_path(Path::new(&path))?
        } else if let Some(list) = lookup("GPA_CREDIT_SCHEME") {
            CreditScheme::parse_list(&list)?
        } else {
            CreditScheme::default()
        };

        let display_precision = match lookup("GPA_DISPLAY_PRECISION") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                GpaError::InvalidInput(format!("GPA_DISPLAY_PRECISION `{}` is not a whole number", raw))
            })?,
            None => DEFAULT_DISPLAY_PRECISION,
        };

        Ok(Self {
            credit_scheme,
            display_precision,
        })
    }

    /// Format a GPA at display precision
    pub fn format_gpa(&self, value: f64) -> String {
        format!("{:.*}", self.display_precision, value)
    }
}
