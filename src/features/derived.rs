//! Tenure relationship features. Shared by the batch transform and single-record prediction.

use serde::{Deserialize, Serialize};

/// Round half to even at `decimals` places
pub fn round_to(v: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (v * scale).round_ties_even() / scale
}

pub fn months_to_years(months: f64) -> f64 {
    round_to(months / 12.0, 2)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelationshipFeatures {
    pub role_stagnation_ratio: f64,
    pub tenure_gap: f64,
    pub early_company_tenure_risk: u8,
    pub long_tenure_low_role_risk: u8,
}

impl RelationshipFeatures {
    /// Tenures are in years. Company tenure is expected to be at least years at company.
    /// An unranked job level never counts as low.
    pub fn derive(years_at_company: f64, company_tenure: f64, job_level: Option<i64>) -> Self {
        let low_role = job_level.is_some_and(|l| l <= 2);
        Self {
            role_stagnation_ratio: round_to(years_at_company / (company_tenure + 1.0), 3),
            tenure_gap: round_to(company_tenure - years_at_company, 2),
            early_company_tenure_risk: u8::from(years_at_company <= 2.0),
            long_tenure_low_role_risk: u8::from(company_tenure > 5.0 && low_role),
        }
    }
}
