//! CSV import and export of the semester table
//!
//! Import needs `Semester` and `GPA` columns; `Credits` is optional and
//! defaults from the credit scheme by row position. Unknown columns are
//! ignored. Any bad row rejects the whole file.

use super::{SemesterRecord, SemesterTable};
use crate::error::{GpaError, GpaResult};
use crate::scheme::CreditScheme;
use csv::{Reader, StringRecord, Writer};
use log::{debug, info};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Column positions resolved from the header row
struct Columns {
    semester: usize,
    gpa: usize,
    credits: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> GpaResult<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        Ok(Self {
            semester: find("Semester").ok_or(GpaError::MissingColumn("Semester"))?,
            gpa: find("GPA").ok_or(GpaError::MissingColumn("GPA"))?,
            credits: find("Credits"),
        })
    }

    fn to_record(&self, record: &StringRecord, row: usize, scheme: &CreditScheme) -> GpaResult<SemesterRecord> {
        let cell = |idx: usize| record.get(idx).map(str::trim).unwrap_or_default();

        let semester = parse_whole(cell(self.semester)).ok_or_else(|| GpaError::InvalidRow {
            row,
            reason: format!("Semester `{}` is not a whole number", cell(self.semester)),
        })?;
        if semester == 0 {
            return Err(GpaError::InvalidRow {
                row,
                reason: "Semester must be 1 or greater".to_string(),
            });
        }

        let gpa: f64 = cell(self.gpa).parse().map_err(|_| GpaError::InvalidRow {
            row,
            reason: format!("GPA `{}` is not a number", cell(self.gpa)),
        })?;
        if !gpa.is_finite() || gpa < 0.0 {
            return Err(GpaError::InvalidRow {
                row,
                reason: format!("GPA {} must be a non-negative number", gpa),
            });
        }

        let given = self.credits.map(cell).filter(|c| !c.is_empty());
        let credits = match given {
            Some(raw) => parse_whole(raw).ok_or_else(|| GpaError::InvalidRow {
                row,
                reason: format!("Credits `{}` is not a whole number", raw),
            })?,
            None => scheme.credits_for(row as u32).ok_or_else(|| GpaError::InvalidRow {
                row,
                reason: format!(
                    "no Credits given and the credit scheme only covers {} rows",
                    scheme.max_semesters()
                ),
            })?,
        };

        Ok(SemesterRecord::new(semester, gpa, credits))
    }
}

/// Whole numbers, also accepting an integral float such as `16.0`
fn parse_whole(raw: &str) -> Option<u32> {
    if let Ok(n) = raw.parse::<u32>() {
        return Some(n);
    }
    let f: f64 = raw.parse().ok()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 {
        Some(f as u32)
    } else {
        None
    }
}

/// Read a semester table from any CSV source
pub fn load_table_from_reader<R: Read>(reader: R, scheme: &CreditScheme) -> GpaResult<SemesterTable> {
    let mut csv_reader = Reader::from_reader(reader);
    let columns = Columns::from_headers(csv_reader.headers()?)?;
    if columns.credits.is_none() {
        debug!("No Credits column; defaulting from credit scheme by row");
    }

    let mut records = Vec::new();
    for (idx, result) in csv_reader.records().enumerate() {
        let record = result?;
        records.push(columns.to_record(&record, idx + 1, scheme)?);
    }

    Ok(SemesterTable::from_records(records))
}

/// Read a semester table from a CSV file
pub fn load_table<P: AsRef<Path>>(path: P, scheme: &CreditScheme) -> GpaResult<SemesterTable> {
    let path = path.as_ref();
    let table = load_table_from_reader(File::open(path)?, scheme)?;
    info!("Loaded {} semester records from {}", table.len(), path.display());
    Ok(table)
}

/// Load a session table, starting empty when the file does not exist yet
pub fn load_table_or_empty<P: AsRef<Path>>(path: P, scheme: &CreditScheme) -> GpaResult<SemesterTable> {
    let path = path.as_ref();
    if !path.exists() {
        debug!("{} not found, starting with an empty table", path.display());
        return Ok(SemesterTable::new());
    }
    load_table(path, scheme)
}

/// Write `Semester,GPA,Credits` rows ordered by semester, GPA at full precision
pub fn write_table<W: Write>(table: &SemesterTable, writer: W) -> GpaResult<()> {
    let mut csv_writer = Writer::from_writer(writer);
    if table.is_empty() {
        csv_writer.write_record(["Semester", "GPA", "Credits"])?;
    }
    for record in table.sorted_by_semester() {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the table to a CSV file
pub fn save_table<P: AsRef<Path>>(table: &SemesterTable, path: P) -> GpaResult<()> {
    let path = path.as_ref();
    write_table(table, File::create(path)?)?;
    info!("Saved {} semester records to {}", table.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(data: &str) -> GpaResult<SemesterTable> {
        load_table_from_reader(data.as_bytes(), &CreditScheme::default())
    }

    #[test]
    fn test_import_full_columns() {
        let table = load("Semester,GPA,Credits\n1,3.25,16\n2,3.5,17\n").unwrap();
        assert_eq!(
            table.records(),
            &[SemesterRecord::new(1, 3.25, 16), SemesterRecord::new(2, 3.5, 17)]
        );
    }

    #[test]
    fn test_import_defaults_credits_by_position() {
        let table = load("Semester,GPA\n1,3.0\n2,3.1\n3,3.2\n4,3.3\n").unwrap();
        let credits: Vec<u32> = table.records().iter().map(|r| r.credits).collect();
        assert_eq!(credits, vec![16, 16, 17, 18]);
    }

    #[test]
    fn test_import_blank_credit_cell_defaults() {
        let table = load("Semester,GPA,Credits\n1,3.0,20\n2,3.1,\n").unwrap();
        assert_eq!(table.records()[0].credits, 20);
        assert_eq!(table.records()[1].credits, 16);
    }

    #[test]
    fn test_import_ignores_unknown_columns_and_order() {
        let table = load("Name,GPA,Term,Semester\nAli,3.4,Fall,1\n").unwrap();
        assert_eq!(table.records(), &[SemesterRecord::new(1, 3.4, 16)]);
    }

    #[test]
    fn test_import_accepts_integral_floats() {
        let table = load("Semester,GPA,Credits\n1.0,3.0,16.0\n").unwrap();
        assert_eq!(table.records(), &[SemesterRecord::new(1, 3.0, 16)]);
    }

    #[test]
    fn test_import_missing_gpa_column() {
        let err = load("Semester,Credits\n1,16\n").unwrap_err();
        assert!(matches!(err, GpaError::MissingColumn("GPA")));

        let err = load("GPA\n3.0\n").unwrap_err();
        assert!(matches!(err, GpaError::MissingColumn("Semester")));
    }

    #[test]
    fn test_import_bad_row_rejects_whole_file() {
        let err = load("Semester,GPA\n1,3.0\n2,abc\n").unwrap_err();
        match err {
            GpaError::InvalidRow { row, reason } => {
                assert_eq!(row, 2);
                assert!(reason.contains("abc"));
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(load("Semester,GPA\n0,3.0\n").is_err());
        assert!(load("Semester,GPA\n1,-0.5\n").is_err());
        assert!(load("Semester,GPA,Credits\n1,3.0,2.5\n").is_err());
    }

    #[test]
    fn test_import_no_default_beyond_scheme() {
        let data: String = std::iter::once("Semester,GPA\n".to_string())
            .chain((1..=9).map(|s| format!("{},3.0\n", s)))
            .collect();
        let err = load(&data).unwrap_err();
        assert!(matches!(err, GpaError::InvalidRow { row: 9, .. }));
    }

    #[test]
    fn test_export_sorted_full_precision() {
        let table = SemesterTable::from_records(vec![
            SemesterRecord::new(2, 3.5764705882352947, 17),
            SemesterRecord::new(1, 3.0, 16),
        ]);

        let mut buf = Vec::new();
        write_table(&table, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(
            text,
            "Semester,GPA,Credits\n1,3.0,16\n2,3.5764705882352947,17\n"
        );

        let back = load(&text).unwrap();
        assert_eq!(back.records(), table.sorted_by_semester().as_slice());
    }

    #[test]
    fn test_export_empty_table_has_header() {
        let mut buf = Vec::new();
        write_table(&SemesterTable::new(), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Semester,GPA,Credits\n");
    }
}
