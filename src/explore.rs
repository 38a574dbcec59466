//! Descriptive statistics over the validated table. Reports only; the table passes through unchanged.

use crate::config::PipelineConfig;
use crate::dataset::{is_missing, Table};
use crate::error::Result;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1)
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalSummary {
    pub count: usize,
    pub unique: usize,
    pub top: String,
    pub freq: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnSummary {
    Numeric(NumericSummary),
    Categorical(CategoricalSummary),
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplorationReport {
    pub columns: Vec<(String, ColumnSummary)>,
    pub attrition_counts: BTreeMap<String, usize>,
    pub mean_income_by_job_level: BTreeMap<String, f64>,
    /// Pearson correlation over numeric columns, keyed by column pair
    pub correlations: Vec<(String, String, f64)>,
}

/// Linear-interpolated quantile of sorted values
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

pub fn describe_numeric(values: &[f64]) -> NumericSummary {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    let var = if n > 1 {
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    } else {
        f64::NAN
    };
    NumericSummary {
        count: n,
        mean,
        std: var.sqrt(),
        min: sorted.first().copied().unwrap_or(f64::NAN),
        q25: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q75: quantile(&sorted, 0.75),
        max: sorted.last().copied().unwrap_or(f64::NAN),
    }
}

pub fn describe_categorical<'a>(cells: impl IntoIterator<Item = &'a str>) -> CategoricalSummary {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    let mut count = 0;
    for c in cells {
        if is_missing(c) {
            continue;
        }
        count += 1;
        let n = counts.entry(c).or_insert(0);
        if *n == 0 {
            order.push(c);
        }
        *n += 1;
    }
    // first-seen wins ties
    let (top, freq) = order
        .iter()
        .map(|c| (*c, counts[c]))
        .fold(("", 0), |best, cur| if cur.1 > best.1 { cur } else { best });
    CategoricalSummary {
        count,
        unique: counts.len(),
        top: top.to_string(),
        freq,
    }
}

pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len()) as f64;
    let mx = x.iter().sum::<f64>() / n;
    let my = y.iter().sum::<f64>() / n;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        sxy += (a - mx) * (b - my);
        sxx += (a - mx).powi(2);
        syy += (b - my).powi(2);
    }
    sxy / (sxx * syy).sqrt()
}

pub fn explore_table(table: &Table) -> Result<ExplorationReport> {
    let mut columns = Vec::new();
    let mut numeric: Vec<(String, Vec<f64>)> = Vec::new();
    for name in &table.headers {
        let summary = match table.numeric_column(name)? {
            Some(values) if !values.is_empty() => {
                // correlation needs row alignment, so only fully populated columns take part
                if values.len() == table.rows.len() {
                    numeric.push((name.clone(), values.clone()));
                }
                ColumnSummary::Numeric(describe_numeric(&values))
            }
            _ => ColumnSummary::Categorical(describe_categorical(table.column(name)?)),
        };
        columns.push((name.clone(), summary));
    }

    let mut attrition_counts = BTreeMap::new();
    if table.column_index("Attrition").is_some() {
        for c in table.column("Attrition")? {
            *attrition_counts.entry(c.to_string()).or_insert(0) += 1;
        }
    }

    let mut mean_income_by_job_level = BTreeMap::new();
    if let (Some(level), Some(income)) = (
        table.column_index("Job Level"),
        table.column_index("Monthly Income"),
    ) {
        let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        for row in &table.rows {
            if let Ok(v) = row[income].trim().parse::<f64>() {
                let e = sums.entry(row[level].clone()).or_insert((0.0, 0));
                e.0 += v;
                e.1 += 1;
            }
        }
        for (k, (sum, n)) in sums {
            mean_income_by_job_level.insert(k, sum / n as f64);
        }
    }

    let mut correlations = Vec::new();
    for (i, (a, xa)) in numeric.iter().enumerate() {
        for (b, xb) in numeric.iter().skip(i + 1) {
            correlations.push((a.clone(), b.clone(), pearson(xa, xb)));
        }
    }

    Ok(ExplorationReport {
        columns,
        attrition_counts,
        mean_income_by_job_level,
        correlations,
    })
}

/// Exploration stage: validated file → EDA file (unchanged) plus a logged report
pub fn explore(config: &PipelineConfig) -> Result<ExplorationReport> {
    let table = Table::read_csv(&config.paths.validation())?;
    let report = explore_table(&table)?;

    for (name, summary) in &report.columns {
        info!(column = %name, summary = ?summary, "describe");
    }
    info!(counts = ?report.attrition_counts, "attrition count");
    info!(means = ?report.mean_income_by_job_level, "monthly income by job level");
    for (a, b, r) in &report.correlations {
        info!(a = %a, b = %b, r = %format!("{:.2}", r), "correlation");
    }

    table.write_csv(&config.paths.eda())?;
    Ok(report)
}
