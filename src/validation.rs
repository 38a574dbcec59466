//! Employee schema validation. Lazy: all failure cases are collected before the
//! stage decides to halt. Non-strict: columns outside the schema pass through.

use crate::config::PipelineConfig;
use crate::dataset::{is_missing, Table};
use crate::error::{PipelineError, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::{error, info};

#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    /// Integer (integral floats are coerced) not below the bound
    IntAtLeast(i64),
    /// Any non-null text
    Text,
    /// Text restricted to a closed set
    OneOf(&'static [&'static str]),
}

#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub check: Check,
    pub unique: bool,
}

impl ColumnSpec {
    fn new(name: &'static str, check: Check) -> Self {
        Self {
            name,
            check,
            unique: false,
        }
    }

    fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

/// One rejected cell (row is the 0-based data row, `None` for column-level failures)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureCase {
    pub column: String,
    pub row: Option<usize>,
    pub value: Option<String>,
    pub check: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub failures: Vec<FailureCase>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.failures {
            writeln!(
                f,
                "{} row={:?} value={:?} check={}",
                c.column, c.row, c.value, c.check
            )?;
        }
        Ok(())
    }
}

const YES_NO: &[&str] = &["Yes", "No"];
const POOR_TO_EXCELLENT: &[&str] = &["Poor", "Fair", "Good", "Excellent"];
const LOW_TO_VERY_HIGH: &[&str] = &["Low", "Medium", "High", "Very High"];

pub fn employee_schema() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("Employee ID", Check::IntAtLeast(1)).unique(),
        ColumnSpec::new("Attrition", Check::OneOf(&["Stayed", "Left"])),
        ColumnSpec::new("Age", Check::IntAtLeast(18)),
        ColumnSpec::new("Gender", Check::OneOf(&["Male", "Female"])),
        ColumnSpec::new("Years at Company", Check::IntAtLeast(0)),
        ColumnSpec::new("Job Role", Check::Text),
        ColumnSpec::new("Monthly Income", Check::IntAtLeast(0)),
        ColumnSpec::new(
            "Job Level",
            Check::OneOf(&["Entry", "Mid", "Senior", "Executive"]),
        ),
        ColumnSpec::new("Work-Life Balance", Check::OneOf(POOR_TO_EXCELLENT)),
        ColumnSpec::new("Job Satisfaction", Check::OneOf(LOW_TO_VERY_HIGH)),
        ColumnSpec::new(
            "Performance Rating",
            Check::OneOf(&["Low", "Below Average", "Average", "High"]),
        ),
        ColumnSpec::new("Number of Promotions", Check::IntAtLeast(0)),
        ColumnSpec::new("Company Size", Check::OneOf(&["Small", "Medium", "Large"])),
        ColumnSpec::new("Company Tenure", Check::IntAtLeast(0)),
        ColumnSpec::new("Remote Work", Check::OneOf(YES_NO)),
        ColumnSpec::new("Leadership Opportunities", Check::OneOf(YES_NO)),
        ColumnSpec::new("Innovation Opportunities", Check::OneOf(YES_NO)),
        ColumnSpec::new("Company Reputation", Check::OneOf(POOR_TO_EXCELLENT)),
        ColumnSpec::new("Employee Recognition", Check::OneOf(LOW_TO_VERY_HIGH)),
    ]
}

/// Parse an integer, accepting integral floats like `12.0`
fn coerce_int(cell: &str) -> Option<i64> {
    let cell = cell.trim();
    if let Ok(v) = cell.parse::<i64>() {
        return Some(v);
    }
    let f = cell.parse::<f64>().ok()?;
    // i64 covers [-2^63, 2^63); `as` would saturate outside it
    let bound = 2f64.powi(63);
    (f.is_finite() && f.fract() == 0.0 && f >= -bound && f < bound).then_some(f as i64)
}

/// Validate `table` against `schema`, returning the coerced table or every failure case.
pub fn validate_table(table: &Table, schema: &[ColumnSpec]) -> std::result::Result<Table, ValidationReport> {
    let mut out = table.clone();
    let mut report = ValidationReport::default();

    for spec in schema {
        let Some(idx) = table.column_index(spec.name) else {
            report.failures.push(FailureCase {
                column: spec.name.to_string(),
                row: None,
                value: None,
                check: "column_in_dataframe".to_string(),
            });
            continue;
        };

        let mut seen = HashSet::new();
        for (row, cells) in out.rows.iter_mut().enumerate() {
            let Some(cell) = cells.get_mut(idx) else {
                continue;
            };
            let fail = |value: &str, check: String| FailureCase {
                column: spec.name.to_string(),
                row: Some(row),
                value: Some(value.to_string()),
                check,
            };

            if is_missing(cell) {
                report.failures.push(fail(cell, "not_nullable".to_string()));
                continue;
            }
            match &spec.check {
                Check::IntAtLeast(min) => match coerce_int(cell) {
                    None => report
                        .failures
                        .push(fail(cell, "coerce_dtype('int64')".to_string())),
                    Some(v) if v < *min => report
                        .failures
                        .push(fail(cell, format!("greater_than_or_equal_to({})", min))),
                    Some(v) => *cell = v.to_string(),
                },
                Check::Text => {}
                Check::OneOf(allowed) => {
                    if !allowed.contains(&cell.as_str()) {
                        report.failures.push(fail(cell, format!("isin({:?})", allowed)));
                    }
                }
            }
            if spec.unique && !seen.insert(cell.clone()) {
                report.failures.push(fail(cell, "field_uniqueness".to_string()));
            }
        }
    }

    if report.is_ok() {
        Ok(out)
    } else {
        Err(report)
    }
}

/// Validation stage: ingestion file → validated file. Halts without writing on any failure.
pub fn validate(config: &PipelineConfig) -> Result<Table> {
    let table = Table::read_csv(&config.paths.ingestion())?;
    match validate_table(&table, &employee_schema()) {
        Ok(validated) => {
            info!(rows = validated.rows.len(), "data validation successful");
            let out = config.paths.validation();
            validated.write_csv(&out)?;
            Ok(validated)
        }
        Err(report) => {
            error!(failures = report.failures.len(), "data validation errors found");
            for case in report.failures.iter().take(50) {
                error!(column = %case.column, row = ?case.row, value = ?case.value, check = %case.check, "failure case");
            }
            Err(PipelineError::Validation(report))
        }
    }
}
