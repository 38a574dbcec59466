//! Feature engineering: raw employee records → engineered records / model feature vectors.

mod binning;
mod derived;
mod encoding;
mod pipeline;
mod record;

pub use binning::{Bins, AGE_BINS, ANNUAL_INCOME_BINS};
pub use derived::{months_to_years, round_to, RelationshipFeatures};
pub use encoding::{encode_binary, encode_label, Encoded, OrdinalScale};
pub use pipeline::{engineer, engineer_record, feature_engineering, EngineeredBatch, UnmappedValue};
pub use record::{EmployeeRecord, EngineeredRecord};

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};

/// Name of the target column in every engineered file
pub const TARGET_COLUMN: &str = "Attrition";

/// Model input columns, in the order the engineered file and the artifact use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    YearsAtCompany,
    PerformanceRating,
    NumberOfPromotions,
    Overtime,
    EducationLevel,
    NumberOfDependents,
    JobLevel,
    CompanySize,
    CompanyTenure,
    RemoteWork,
    CompanyReputation,
    OverallSatisfaction,
    Opportunities,
    AnnualIncome,
    AgeGroup,
    RoleStagnationRatio,
    TenureGap,
    EarlyCompanyTenureRisk,
    LongTenureLowRoleRisk,
}

impl Feature {
    pub const ALL: [Feature; 19] = [
        Feature::YearsAtCompany,
        Feature::PerformanceRating,
        Feature::NumberOfPromotions,
        Feature::Overtime,
        Feature::EducationLevel,
        Feature::NumberOfDependents,
        Feature::JobLevel,
        Feature::CompanySize,
        Feature::CompanyTenure,
        Feature::RemoteWork,
        Feature::CompanyReputation,
        Feature::OverallSatisfaction,
        Feature::Opportunities,
        Feature::AnnualIncome,
        Feature::AgeGroup,
        Feature::RoleStagnationRatio,
        Feature::TenureGap,
        Feature::EarlyCompanyTenureRisk,
        Feature::LongTenureLowRoleRisk,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Feature::YearsAtCompany => "Years at Company",
            Feature::PerformanceRating => "Performance Rating",
            Feature::NumberOfPromotions => "Number of Promotions",
            Feature::Overtime => "Overtime",
            Feature::EducationLevel => "Education Level",
            Feature::NumberOfDependents => "Number of Dependents",
            Feature::JobLevel => "Job Level",
            Feature::CompanySize => "Company Size",
            Feature::CompanyTenure => "Company Tenure",
            Feature::RemoteWork => "Remote Work",
            Feature::CompanyReputation => "Company Reputation",
            Feature::OverallSatisfaction => "OverallSatisfaction",
            Feature::Opportunities => "Opportunities",
            Feature::AnnualIncome => "AnnualIncome",
            Feature::AgeGroup => "AgeGroup",
            Feature::RoleStagnationRatio => "RoleStagnationRatio",
            Feature::TenureGap => "TenureGap",
            Feature::EarlyCompanyTenureRisk => "EarlyCompanyTenureRisk",
            Feature::LongTenureLowRoleRisk => "LongTenureLowRoleRisk",
        }
    }

    /// Column names in model order
    pub fn columns() -> Vec<String> {
        Self::ALL.iter().map(|f| f.name().to_string()).collect()
    }
}

/// One fully-populated model input row, ordered as [`Feature::ALL`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub values: Vec<f64>,
}

impl FeatureVector {
    /// Collect a value per feature; the first missing one fails with its row and column
    pub fn collect(row: usize, mut value: impl FnMut(Feature) -> Option<f64>) -> Result<Self> {
        let mut values = Vec::with_capacity(Feature::ALL.len());
        for f in Feature::ALL {
            let v = value(f).ok_or_else(|| PipelineError::MissingValue {
                row,
                column: f.name().to_string(),
            })?;
            values.push(v);
        }
        Ok(Self { values })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, feature: Feature) -> f64 {
        let idx = Feature::ALL.iter().position(|f| *f == feature).unwrap_or(0);
        self.values[idx]
    }
}
