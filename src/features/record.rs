//! Typed rows for the cleaned input and the engineered output files.

use super::Feature;
use serde::{Deserialize, Serialize};

/// The raw columns feature engineering reads. Other columns in the file are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    #[serde(rename = "Age")]
    pub age: f64,
    /// Months
    #[serde(rename = "Years at Company")]
    pub years_at_company: f64,
    #[serde(rename = "Monthly Income")]
    pub monthly_income: f64,
    #[serde(rename = "Work-Life Balance")]
    pub work_life_balance: String,
    #[serde(rename = "Job Satisfaction")]
    pub job_satisfaction: String,
    #[serde(rename = "Performance Rating")]
    pub performance_rating: String,
    #[serde(rename = "Number of Promotions")]
    pub number_of_promotions: i64,
    #[serde(rename = "Overtime")]
    pub overtime: String,
    #[serde(rename = "Education Level")]
    pub education_level: String,
    /// Empty cell reads as null; the column itself is still required
    #[serde(rename = "Number of Dependents")]
    pub number_of_dependents: Option<i64>,
    #[serde(rename = "Job Level")]
    pub job_level: String,
    #[serde(rename = "Company Size")]
    pub company_size: String,
    /// Months
    #[serde(rename = "Company Tenure")]
    pub company_tenure: f64,
    #[serde(rename = "Remote Work")]
    pub remote_work: String,
    #[serde(rename = "Leadership Opportunities")]
    pub leadership_opportunities: String,
    #[serde(rename = "Innovation Opportunities")]
    pub innovation_opportunities: String,
    #[serde(rename = "Company Reputation")]
    pub company_reputation: String,
    #[serde(rename = "Employee Recognition")]
    pub employee_recognition: String,
    #[serde(rename = "Attrition")]
    pub attrition: String,
}

impl EmployeeRecord {
    /// Header names every cleaned file must carry
    pub const COLUMNS: [&'static str; 19] = [
        "Age",
        "Years at Company",
        "Monthly Income",
        "Work-Life Balance",
        "Job Satisfaction",
        "Performance Rating",
        "Number of Promotions",
        "Overtime",
        "Education Level",
        "Number of Dependents",
        "Job Level",
        "Company Size",
        "Company Tenure",
        "Remote Work",
        "Leadership Opportunities",
        "Innovation Opportunities",
        "Company Reputation",
        "Employee Recognition",
        "Attrition",
    ];
}

/// One engineered row. Field order is the column order of the engineered file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineeredRecord {
    /// Years
    #[serde(rename = "Years at Company")]
    pub years_at_company: f64,
    #[serde(rename = "Performance Rating")]
    pub performance_rating: Option<i64>,
    #[serde(rename = "Number of Promotions")]
    pub number_of_promotions: i64,
    #[serde(rename = "Overtime")]
    pub overtime: Option<i64>,
    #[serde(rename = "Education Level")]
    pub education_level: Option<i64>,
    #[serde(rename = "Number of Dependents")]
    pub number_of_dependents: Option<i64>,
    #[serde(rename = "Job Level")]
    pub job_level: Option<i64>,
    #[serde(rename = "Company Size")]
    pub company_size: Option<i64>,
    /// Years
    #[serde(rename = "Company Tenure")]
    pub company_tenure: f64,
    #[serde(rename = "Remote Work")]
    pub remote_work: Option<i64>,
    #[serde(rename = "Company Reputation")]
    pub company_reputation: Option<i64>,
    #[serde(rename = "Attrition")]
    pub attrition: u8,
    #[serde(rename = "OverallSatisfaction")]
    pub overall_satisfaction: Option<i64>,
    #[serde(rename = "Opportunities")]
    pub opportunities: Option<i64>,
    #[serde(rename = "AnnualIncome")]
    pub annual_income: Option<i64>,
    #[serde(rename = "AgeGroup")]
    pub age_group: Option<i64>,
    #[serde(rename = "RoleStagnationRatio")]
    pub role_stagnation_ratio: f64,
    #[serde(rename = "TenureGap")]
    pub tenure_gap: f64,
    #[serde(rename = "EarlyCompanyTenureRisk")]
    pub early_company_tenure_risk: u8,
    #[serde(rename = "LongTenureLowRoleRisk")]
    pub long_tenure_low_role_risk: u8,
}

impl EngineeredRecord {
    pub fn value(&self, feature: Feature) -> Option<f64> {
        let int = |v: Option<i64>| v.map(|v| v as f64);
        match feature {
            Feature::YearsAtCompany => Some(self.years_at_company),
            Feature::PerformanceRating => int(self.performance_rating),
            Feature::NumberOfPromotions => Some(self.number_of_promotions as f64),
            Feature::Overtime => int(self.overtime),
            Feature::EducationLevel => int(self.education_level),
            Feature::NumberOfDependents => int(self.number_of_dependents),
            Feature::JobLevel => int(self.job_level),
            Feature::CompanySize => int(self.company_size),
            Feature::CompanyTenure => Some(self.company_tenure),
            Feature::RemoteWork => int(self.remote_work),
            Feature::CompanyReputation => int(self.company_reputation),
            Feature::OverallSatisfaction => int(self.overall_satisfaction),
            Feature::Opportunities => int(self.opportunities),
            Feature::AnnualIncome => int(self.annual_income),
            Feature::AgeGroup => int(self.age_group),
            Feature::RoleStagnationRatio => Some(self.role_stagnation_ratio),
            Feature::TenureGap => Some(self.tenure_gap),
            Feature::EarlyCompanyTenureRisk => Some(f64::from(self.early_company_tenure_risk)),
            Feature::LongTenureLowRoleRisk => Some(f64::from(self.long_tenure_low_role_risk)),
        }
    }
}
