//! Semester table and its CSV import/export

mod record;
pub mod loader;

pub use record::{SemesterRecord, SemesterTable, TableSummary};
pub use loader::{load_table, load_table_from_reader, load_table_or_empty, save_table, write_table};
