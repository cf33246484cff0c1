//! AWS Lambda handler for GPA calculations
//!
//! Each invocation carries the caller's semester table along with the
//! calculation inputs and gets the updated table back; nothing is kept
//! between invocations. User-input problems come back in the `error` field
//! rather than as a failed invocation.

use gpa_calculator::calculator::{CgpaOutcome, FinderOutcome, OneStepOutcome, SemesterOutcome};
use gpa_calculator::{
    Calculator, CalculatorConfig, CreditScheme, FinderInput, GpaResult, SemesterTable, Subject,
    TableSummary,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::info;
use serde::{Deserialize, Serialize};

/// Calculation mode and its inputs
#[derive(Debug, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Mode {
    /// Semester GPA from subjects
    SemesterGpa { semester: u32, subjects: Vec<Subject> },
    /// CGPA from semester GPAs; credits default from the scheme
    CgpaFromSemesters {
        gpas: Vec<f64>,
        #[serde(default)]
        credits: Vec<u32>,
    },
    /// Back-calculated current semester GPA
    FindCurrentGpa { semester: u32, input: FinderInput },
    /// Semester GPA then updated CGPA
    OneStep {
        semester: u32,
        subjects: Vec<Subject>,
        #[serde(default)]
        prev_cgpa: Option<f64>,
    },
    /// CGPA of the table as sent
    Summary,
}

/// Input payload
#[derive(Debug, Deserialize)]
pub struct CalculationRequest {
    #[serde(flatten)]
    pub mode: Mode,

    /// Semester records the caller has saved so far
    #[serde(default)]
    pub table: SemesterTable,

    /// Per-semester credits replacing the configured scheme for this request
    #[serde(default)]
    pub credit_scheme: Option<Vec<u32>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Outcome {
    SemesterGpa(SemesterOutcome),
    CgpaFromSemesters(CgpaOutcome),
    FindCurrentGpa(FinderOutcome),
    OneStep(OneStepOutcome),
}

/// Output payload
#[derive(Debug, Serialize)]
pub struct CalculationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<TableSummary>,
    pub table: SemesterTable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Set when the error was a zero credit total
    pub division_by_zero: bool,
    pub execution_time_ms: u64,
}

fn calculate(config: &CalculatorConfig, request: CalculationRequest) -> CalculationResponse {
    let start = std::time::Instant::now();
    let mut table = request.table;

    let result = calculator_for(config, request.credit_scheme)
        .and_then(|calc| run_mode(&calc, &mut table, request.mode));

    let (outcome, error, division_by_zero) = match result {
        Ok(outcome) => (outcome, None, false),
        Err(err) => (None, Some(err.to_string()), err.is_division_by_zero()),
    };
    // Summary is best effort: an empty or zero-credit table just has none
    let summary = table.cumulative().ok();

    CalculationResponse {
        outcome,
        summary,
        table,
        error,
        division_by_zero,
        execution_time_ms: start.elapsed().as_millis() as u64,
    }
}

fn calculator_for(config: &CalculatorConfig, scheme: Option<Vec<u32>>) -> GpaResult<Calculator> {
    let mut config = config.clone();
    if let Some(credits) = scheme {
        config.credit_scheme = CreditScheme::new(credits)?;
    }
    Ok(Calculator::new(config))
}

fn run_mode(calc: &Calculator, table: &mut SemesterTable, mode: Mode) -> GpaResult<Option<Outcome>> {
    let outcome = match mode {
        Mode::SemesterGpa { semester, subjects } => {
            Outcome::SemesterGpa(calc.semester_gpa(table, semester, &subjects)?)
        }
        Mode::CgpaFromSemesters { gpas, credits } => {
            let entries = calc.semester_entries(&gpas, &credits)?;
            Outcome::CgpaFromSemesters(calc.cgpa_from_semesters(table, &entries)?)
        }
        Mode::FindCurrentGpa { semester, input } => {
            Outcome::FindCurrentGpa(calc.find_current_gpa(semester, &input)?)
        }
        Mode::OneStep { semester, subjects, prev_cgpa } => {
            Outcome::OneStep(calc.one_step(table, semester, &subjects, prev_cgpa)?)
        }
        Mode::Summary => {
            table.cumulative()?;
            return Ok(None);
        }
    };
    Ok(Some(outcome))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    let config = CalculatorConfig::from_env()?;
    info!("Credit scheme: {:?}", config.credit_scheme.credits());

    run(service_fn(move |event: LambdaEvent<CalculationRequest>| {
        let response = calculate(&config, event.payload);
        async move { Ok::<_, Error>(response) }
    }))
    .await
}
