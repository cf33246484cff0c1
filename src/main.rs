//! GPA Calculator CLI
//!
//! The semester table lives in a CSV file (`--table`, default `semesters.csv`)
//! that is read before and written after every command that changes it.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gpa_calculator::chart::{save_trend_svg, ChartOptions};
use gpa_calculator::table::{load_table, load_table_or_empty, save_table};
use gpa_calculator::{
    Calculator, CalculatorConfig, CreditScheme, FinderInput, GpaError, SemesterTable, Subject,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "gpa", about = "GPA & CGPA calculator", version)]
struct Cli {
    /// Session table read before and saved after each command
    #[arg(long, global = true, default_value = "semesters.csv")]
    table: PathBuf,

    /// Credit scheme CSV (`Semester,Credits`), overrides GPA_SCHEME_FILE / GPA_CREDIT_SCHEME
    #[arg(long, global = true)]
    scheme_file: Option<PathBuf>,

    /// Decimal places for printed GPAs, overrides GPA_DISPLAY_PRECISION
    #[arg(long, global = true)]
    precision: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Semester GPA from subject grade points and credit hours
    Semester {
        #[arg(long)]
        semester: u32,
        /// GRADE_POINT:CREDITS, repeat per subject
        #[arg(long = "subject", required = true, value_parser = parse_subject)]
        subjects: Vec<Subject>,
    },

    /// CGPA from the GPA of every completed semester (replaces the table)
    Cgpa {
        /// GPA of semester 1, 2, ... in order
        #[arg(long = "gpa", required = true)]
        gpas: Vec<f64>,
        /// Credits of semester 1, 2, ...; missing entries come from the scheme,
        /// more values than `--gpa` is an error
        #[arg(long = "credits")]
        credits: Vec<u32>,
    },

    /// Back-calculate the current semester GPA from cumulative figures
    Find {
        #[arg(long)]
        semester: u32,
        #[arg(long)]
        new_cgpa: f64,
        /// CGPA up to the previous semester
        #[arg(long, conflicts_with = "previous")]
        prev_cgpa: Option<f64>,
        /// GPA[:CREDITS] of each previous semester in order
        #[arg(long = "previous", value_parser = parse_previous)]
        previous: Vec<(f64, Option<u32>)>,
    },

    /// Semester GPA from subjects, then the updated CGPA
    OneStep {
        #[arg(long)]
        semester: u32,
        #[arg(long = "subject", required = true, value_parser = parse_subject)]
        subjects: Vec<Subject>,
        #[arg(long)]
        prev_cgpa: Option<f64>,
    },

    /// Print the saved table and its CGPA
    Show,

    /// Replace the saved table with a CSV file (Semester, GPA, optional Credits)
    Import { file: PathBuf },

    /// Write the saved table as CSV
    Export { file: PathBuf },

    /// Clear the saved table
    Reset,

    /// Write the GPA trend chart as SVG
    Chart { file: PathBuf },

    /// Print the credit scheme in use
    Scheme,
}

fn parse_subject(raw: &str) -> Result<Subject, String> {
    let (gp, cr) = raw
        .split_once(':')
        .ok_or_else(|| format!("`{}` should look like GRADE_POINT:CREDITS", raw))?;
    let grade_point = gp.trim().parse().map_err(|_| format!("bad grade point `{}`", gp))?;
    let credits = cr.trim().parse().map_err(|_| format!("bad credit hours `{}`", cr))?;
    Ok(Subject::new(grade_point, credits))
}

fn parse_previous(raw: &str) -> Result<(f64, Option<u32>), String> {
    match raw.split_once(':') {
        Some((gpa, cr)) => Ok((
            gpa.trim().parse().map_err(|_| format!("bad GPA `{}`", gpa))?,
            Some(cr.trim().parse().map_err(|_| format!("bad credits `{}`", cr))?),
        )),
        None => Ok((raw.trim().parse().map_err(|_| format!("bad GPA `{}`", raw))?, None)),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<GpaError>() {
                Some(gpa_err) if gpa_err.is_division_by_zero() => {
                    eprintln!("Error: total credit hours cannot be zero ({})", gpa_err);
                }
                _ => eprintln!("Error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = CalculatorConfig::from_env().context("Invalid configuration")?;
    if let Some(path) = &cli.scheme_file {
        config.credit_scheme = CreditScheme::from_csv_path(path)
            .with_context(|| format!("Failed to load credit scheme {}", path.display()))?;
    }
    if let Some(precision) = cli.precision {
        config.display_precision = precision;
    }
    let calc = Calculator::new(config);
    let fmt = |v: f64| calc.config().format_gpa(v);

    let mut table = load_table_or_empty(&cli.table, calc.scheme())
        .with_context(|| format!("Failed to read session table {}", cli.table.display()))?;

    match cli.command {
        Command::Semester { semester, subjects } => {
            let outcome = calc.semester_gpa(&mut table, semester, &subjects)?;
            println!(
                "Semester {} GPA = {}  (Total credits = {})",
                outcome.semester,
                fmt(outcome.gpa),
                outcome.total_credits
            );
            persist(&table, &cli.table)?;
        }
        Command::Cgpa { gpas, credits } => {
            let entries = calc.semester_entries(&gpas, &credits)?;
            let outcome = calc.cgpa_from_semesters(&mut table, &entries)?;
            println!(
                "CGPA after {} semesters = {} (Total credits = {})",
                outcome.semesters,
                fmt(outcome.cgpa),
                outcome.total_credits
            );
            persist(&table, &cli.table)?;
        }
        Command::Find { semester, new_cgpa, prev_cgpa, previous } => {
            let input = finder_input(&calc, semester, new_cgpa, prev_cgpa, &previous)?;
            let outcome = calc.find_current_gpa(semester, &input)?;
            if let FinderInput::FromPreviousGpas { .. } = input {
                println!("Calculated previous CGPA = {}", fmt(outcome.prev_cgpa));
            }
            println!(
                "Estimated GPA for semester {} = {}",
                outcome.semester,
                fmt(outcome.current_gpa)
            );
        }
        Command::OneStep { semester, subjects, prev_cgpa } => {
            let outcome = calc.one_step(&mut table, semester, &subjects, prev_cgpa)?;
            println!("Semester {} GPA = {}", outcome.semester, fmt(outcome.semester_gpa));
            println!("Updated CGPA after semester {} = {}", outcome.semester, fmt(outcome.cgpa));
            persist(&table, &cli.table)?;
        }
        Command::Show => show(&table, &calc),
        Command::Import { file } => {
            let imported = load_table(&file, calc.scheme())
                .with_context(|| format!("Failed to import {}", file.display()))?;
            table.replace(imported.records().to_vec());
            println!("Imported {} semester records", table.len());
            persist(&table, &cli.table)?;
        }
        Command::Export { file } => {
            save_table(&table, &file).with_context(|| format!("Failed to write {}", file.display()))?;
            println!("Exported {} semester records to {}", table.len(), file.display());
        }
        Command::Reset => {
            table.clear();
            persist(&table, &cli.table)?;
            println!("Cleared saved semester table.");
        }
        Command::Chart { file } => {
            save_trend_svg(&table, &ChartOptions::default(), &file)
                .with_context(|| format!("Failed to write chart {}", file.display()))?;
            println!("GPA trend chart written to {}", file.display());
        }
        Command::Scheme => {
            let scheme = calc.scheme();
            println!("{:>8} {:>7}", "Semester", "Credits");
            for (idx, credits) in scheme.credits().iter().enumerate() {
                println!("{:>8} {:>7}", idx + 1, credits);
            }
            println!("Total credits: {}", scheme.credits_before(scheme.max_semesters() + 1));
        }
    }

    Ok(())
}

fn finder_input(
    calc: &Calculator,
    semester: u32,
    new_cgpa: f64,
    prev_cgpa: Option<f64>,
    previous: &[(f64, Option<u32>)],
) -> Result<FinderInput> {
    if let Some(prev_cgpa) = prev_cgpa {
        return Ok(FinderInput::FromCgpa { prev_cgpa, new_cgpa });
    }
    if previous.is_empty() && semester != 1 {
        bail!("semester {} needs --prev-cgpa or one --previous per earlier semester", semester);
    }

    let previous = calc.semester_entries_from(previous)?;
    Ok(FinderInput::FromPreviousGpas { previous, new_cgpa })
}

fn show(table: &SemesterTable, calc: &Calculator) {
    if table.is_empty() {
        println!("No semester data saved yet. Use the calculators to add results.");
        return;
    }

    println!("{:>8} {:>10} {:>7}", "Semester", "GPA", "Credits");
    println!("{}", "-".repeat(27));
    for record in table.sorted_by_semester() {
        println!(
            "{:>8} {:>10} {:>7}",
            record.semester,
            calc.config().format_gpa(record.gpa),
            record.credits
        );
    }

    match table.cumulative() {
        Ok(summary) => {
            println!("\nComputed CGPA: {}", calc.config().format_gpa(summary.cgpa));
            println!("Total Credits: {}", summary.total_credits);
        }
        Err(err) => println!("\nCGPA unavailable: {}", err),
    }
}

fn persist(table: &SemesterTable, path: &Path) -> Result<()> {
    save_table(table, path).with_context(|| format!("Failed to save session table {}", path.display()))
}
