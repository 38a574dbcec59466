//! Duplicate and missing-value detection. Reports only; rows are not dropped.

use crate::config::PipelineConfig;
use crate::dataset::{is_missing, Table};
use crate::error::Result;
use std::collections::HashSet;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct CleaningReport {
    pub rows: usize,
    /// Rows that exactly repeat an earlier row
    pub duplicate_rows: usize,
    /// Missing cells per column, in header order
    pub missing: Vec<(String, usize)>,
}

pub fn inspect(table: &Table) -> CleaningReport {
    let mut seen: HashSet<&[String]> = HashSet::new();
    let duplicate_rows = table
        .rows
        .iter()
        .filter(|r| !seen.insert(r.as_slice()))
        .count();

    let missing = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let n = table
                .rows
                .iter()
                .filter(|r| r.get(i).map_or(true, |c| is_missing(c)))
                .count();
            (name.clone(), n)
        })
        .collect();

    CleaningReport {
        rows: table.rows.len(),
        duplicate_rows,
        missing,
    }
}

/// Cleaning stage: EDA file → cleaning file (unchanged) plus a logged report
pub fn clean(config: &PipelineConfig) -> Result<CleaningReport> {
    let table = Table::read_csv(&config.paths.eda())?;
    let report = inspect(&table);
    info!(duplicates = report.duplicate_rows, "duplicate rows");
    for (column, n) in &report.missing {
        info!(column = %column, missing = n, "missing values");
    }
    table.write_csv(&config.paths.cleaning())?;
    Ok(report)
}
