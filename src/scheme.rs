//! Credit scheme: default credit load per semester index

use crate::error::{GpaError, GpaResult};
use std::fs::File;
use std::path::Path;

/// Default 8-semester scheme (BS four-year programme)
pub const DEFAULT_SEMESTER_CREDITS: [u32; 8] = [16, 16, 17, 18, 17, 17, 16, 18];

/// Credit load by semester (1-indexed)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditScheme {
    credits: Vec<u32>,
}

impl CreditScheme {
    /// Build a scheme from explicit per-semester credits
    ///
    /// Every entry must be positive: the current-semester credits feed a
    /// denominator during back-calculation. The total must fit in a `u32`, so
    /// every [`credits_before`](Self::credits_before) sum does too.
    pub fn new(credits: Vec<u32>) -> GpaResult<Self> {
        if credits.is_empty() {
            return Err(GpaError::InvalidScheme("scheme has no semesters".to_string()));
        }
        if let Some(pos) = credits.iter().position(|&c| c == 0) {
            return Err(GpaError::InvalidScheme(format!(
                "semester {} has zero credits",
                pos + 1
            )));
        }
        if credits.iter().try_fold(0u32, |acc, &c| acc.checked_add(c)).is_none() {
            return Err(GpaError::InvalidScheme(format!(
                "total credits exceed {}",
                u32::MAX
            )));
        }
        Ok(Self { credits })
    }

    /// Parse a comma-separated list such as `16,16,17,18`
    pub fn parse_list(list: &str) -> GpaResult<Self> {
        let credits = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<u32>()
                    .map_err(|_| GpaError::InvalidScheme(format!("`{}` is not a credit count", s)))
            })
            .collect::<GpaResult<Vec<_>>>()?;
        Self::new(credits)
    }

    /// Load from a CSV file with `Semester,Credits` rows
    pub fn from_csv_path(path: &Path) -> GpaResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load from any reader with `Semester,Credits` rows
    ///
    /// Semesters must run 1, 2, 3, ... without gaps.
    pub fn from_reader<R: std::io::Read>(reader: R) -> GpaResult<Self> {
        let mut reader = csv::Reader::from_reader(reader);
        let mut credits = Vec::new();

        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let row = idx + 1;
            let semester: usize = parse_field(&record, 0, row, "Semester")?;
            let credit: u32 = parse_field(&record, 1, row, "Credits")?;

            if semester != credits.len() + 1 {
                return Err(GpaError::InvalidScheme(format!(
                    "expected semester {} at row {}, found {}",
                    credits.len() + 1,
                    row,
                    semester
                )));
            }
            credits.push(credit);
        }

        Self::new(credits)
    }

    /// Number of semesters the scheme covers
    pub fn max_semesters(&self) -> u32 {
        self.credits.len() as u32
    }

    /// Credits for a semester, `None` outside 1..=max_semesters
    pub fn credits_for(&self, semester: u32) -> Option<u32> {
        if semester == 0 {
            return None;
        }
        self.credits.get(semester as usize - 1).copied()
    }

    /// Credits of all semesters before `semester`
    pub fn credits_before(&self, semester: u32) -> u32 {
        let end = (semester.saturating_sub(1) as usize).min(self.credits.len());
        self.credits[..end].iter().sum()
    }

    /// Per-semester credits in order
    pub fn credits(&self) -> &[u32] {
        &self.credits
    }
}

impl Default for CreditScheme {
    fn default() -> Self {
        Self {
            credits: DEFAULT_SEMESTER_CREDITS.to_vec(),
        }
    }
}

fn parse_field<T: std::str::FromStr>(
    record: &csv::StringRecord,
    idx: usize,
    row: usize,
    name: &str,
) -> GpaResult<T> {
    let raw = record.get(idx).map(str::trim).unwrap_or_default();
    raw.parse().map_err(|_| GpaError::InvalidRow {
        row,
        reason: format!("{} `{}` is not a whole number", name, raw),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scheme() {
        let scheme = CreditScheme::default();

        assert_eq!(scheme.max_semesters(), 8);
        assert_eq!(scheme.credits_for(1), Some(16));
        assert_eq!(scheme.credits_for(4), Some(18));
        assert_eq!(scheme.credits_for(8), Some(18));
        assert_eq!(scheme.credits_for(0), None);
        assert_eq!(scheme.credits_for(9), None);
    }

    #[test]
    fn test_credits_before() {
        let scheme = CreditScheme::default();

        assert_eq!(scheme.credits_before(1), 0);
        assert_eq!(scheme.credits_before(2), 16);
        assert_eq!(scheme.credits_before(3), 32);
        assert_eq!(scheme.credits_before(9), 135);
        assert_eq!(scheme.credits_before(20), 135);
    }

    #[test]
    fn test_parse_list() {
        let scheme = CreditScheme::parse_list("15, 15,18").unwrap();
        assert_eq!(scheme.credits(), &[15, 15, 18]);

        assert!(CreditScheme::parse_list("").is_err());
        assert!(CreditScheme::parse_list("16,0,17").is_err());
        assert!(CreditScheme::parse_list("16,x").is_err());
    }

    #[test]
    fn test_rejects_total_overflow() {
        let err = CreditScheme::parse_list("4294967295,4294967295,1").unwrap_err();
        assert!(matches!(err, GpaError::InvalidScheme(_)));

        let err = CreditScheme::new(vec![u32::MAX, 1]).unwrap_err();
        assert!(err.to_string().contains("total credits exceed"));

        // Largest accepted total still sums without overflow
        let scheme = CreditScheme::new(vec![u32::MAX - 1, 1]).unwrap();
        assert_eq!(scheme.credits_before(3), u32::MAX);
    }

    #[test]
    fn test_from_reader() {
        let data = "Semester,Credits\n1,20\n2,19\n3,21\n";
        let scheme = CreditScheme::from_reader(data.as_bytes()).unwrap();
        assert_eq!(scheme.credits(), &[20, 19, 21]);
    }

    #[test]
    fn test_from_reader_rejects_gap() {
        let data = "Semester,Credits\n1,20\n3,21\n";
        let err = CreditScheme::from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, GpaError::InvalidScheme(_)));
    }
}
