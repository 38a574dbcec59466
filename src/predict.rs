//! Single-record scoring against the persisted artifact.
//!
//! The caller supplies already-encoded values for 15 engineered columns plus both
//! tenures in years; the four relationship features are derived with the same
//! function the batch transform uses.

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::features::{Feature, FeatureVector, RelationshipFeatures};
use crate::model::AttritionModel;
use crate::risk::{RiskEngine, RiskResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{error, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionInput {
    /// Years
    #[serde(rename = "Years at Company")]
    pub years_at_company: f64,
    /// Low 1, Below Average 2, Average 3, High 4
    #[serde(rename = "Performance Rating")]
    pub performance_rating: f64,
    #[serde(rename = "Number of Promotions")]
    pub number_of_promotions: i64,
    /// No 0, Yes 1
    #[serde(rename = "Overtime")]
    pub overtime: i64,
    /// High School 1, Bachelor's 2, Master's 3, Associate 4, PhD 5
    #[serde(rename = "Education Level")]
    pub education_level: i64,
    #[serde(rename = "Number of Dependents")]
    pub number_of_dependents: i64,
    /// Entry 1, Mid 2, Senior 3
    #[serde(rename = "Job Level")]
    pub job_level: i64,
    /// Small 1, Medium 2, Large 3
    #[serde(rename = "Company Size")]
    pub company_size: i64,
    /// Years
    #[serde(rename = "Company Tenure")]
    pub company_tenure: f64,
    /// No 0, Yes 1
    #[serde(rename = "Remote Work")]
    pub remote_work: i64,
    /// Poor 1 .. Excellent 4
    #[serde(rename = "Company Reputation")]
    pub company_reputation: f64,
    /// Low 1 .. Very High 4
    #[serde(rename = "OverallSatisfaction")]
    pub overall_satisfaction: f64,
    /// Count of leadership/innovation opportunities, 0–2
    #[serde(rename = "Opportunities")]
    pub opportunities: f64,
    /// Income band 0–4
    #[serde(rename = "AnnualIncome")]
    pub annual_income: i64,
    /// Age band 1–5
    #[serde(rename = "AgeGroup")]
    pub age_group: i64,
}

impl PredictionInput {
    pub fn relationship(&self) -> RelationshipFeatures {
        RelationshipFeatures::derive(self.years_at_company, self.company_tenure, Some(self.job_level))
    }

    fn value(&self, feature: Feature, rel: &RelationshipFeatures) -> f64 {
        match feature {
            Feature::YearsAtCompany => self.years_at_company,
            Feature::PerformanceRating => self.performance_rating,
            Feature::NumberOfPromotions => self.number_of_promotions as f64,
            Feature::Overtime => self.overtime as f64,
            Feature::EducationLevel => self.education_level as f64,
            Feature::NumberOfDependents => self.number_of_dependents as f64,
            Feature::JobLevel => self.job_level as f64,
            Feature::CompanySize => self.company_size as f64,
            Feature::CompanyTenure => self.company_tenure,
            Feature::RemoteWork => self.remote_work as f64,
            Feature::CompanyReputation => self.company_reputation,
            Feature::OverallSatisfaction => self.overall_satisfaction,
            Feature::Opportunities => self.opportunities,
            Feature::AnnualIncome => self.annual_income as f64,
            Feature::AgeGroup => self.age_group as f64,
            Feature::RoleStagnationRatio => rel.role_stagnation_ratio,
            Feature::TenureGap => rel.tenure_gap,
            Feature::EarlyCompanyTenureRisk => f64::from(rel.early_company_tenure_risk),
            Feature::LongTenureLowRoleRisk => f64::from(rel.long_tenure_low_role_risk),
        }
    }

    /// The single engineered row, in model column order
    pub fn feature_vector(&self) -> Result<FeatureVector> {
        let rel = self.relationship();
        FeatureVector::collect(0, |f| Some(self.value(f, &rel)))
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

pub struct Predictor {
    model: AttritionModel,
    risk: RiskEngine,
}

impl Predictor {
    pub fn new(model: AttritionModel, risk: RiskEngine) -> Result<Self> {
        model.validate()?;
        model.check_columns(&Feature::columns())?;
        Ok(Self { model, risk })
    }

    /// Load the artifact. A missing or unreadable artifact is logged and yields `None`.
    pub fn load(config: &PipelineConfig) -> Option<Self> {
        let path = config.paths.model();
        let model = match AttritionModel::load(&path) {
            Ok(m) => m,
            Err(e) => {
                error!(path = %path.display(), error = %e, "error loading model");
                return None;
            }
        };
        match Self::new(model, RiskEngine::new(config.risk.clone())) {
            Ok(p) => Some(p),
            Err(e) => {
                error!(path = %path.display(), error = %e, "model does not match feature schema");
                None
            }
        }
    }

    pub fn predict(&self, input: &PredictionInput) -> Result<RiskResult> {
        let fv = input.feature_vector()?;
        let probability = self.model.predict_one(&fv)?;
        Ok(self.risk.score(probability))
    }
}

/// Prediction entry point: `None` when no usable artifact could be loaded
pub fn predict(config: &PipelineConfig, input: &PredictionInput) -> Result<Option<RiskResult>> {
    let Some(predictor) = Predictor::load(config) else {
        return Ok(None);
    };
    let result = predictor.predict(input)?;
    info!(
        prediction = result.decision.label(),
        decision = ?result.decision,
        risk = %result.level,
        p_leave = %format!("{:.4}", result.p_leave),
        "prediction"
    );
    Ok(Some(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> PredictionInput {
        PredictionInput {
            years_at_company: 3.0,
            performance_rating: 3.0,
            number_of_promotions: 1,
            overtime: 0,
            education_level: 2,
            number_of_dependents: 1,
            job_level: 2,
            company_size: 2,
            company_tenure: 6.0,
            remote_work: 0,
            company_reputation: 3.0,
            overall_satisfaction: 3.0,
            opportunities: 1.0,
            annual_income: 1,
            age_group: 2,
        }
    }

    #[test]
    fn derives_relationship_features() {
        let fv = input().feature_vector().unwrap();
        assert_eq!(fv.values.len(), Feature::ALL.len());
        assert_eq!(fv.get(Feature::RoleStagnationRatio), 0.429);
        assert_eq!(fv.get(Feature::TenureGap), 3.0);
        assert_eq!(fv.get(Feature::EarlyCompanyTenureRisk), 0.0);
        assert_eq!(fv.get(Feature::LongTenureLowRoleRisk), 1.0);
    }

    #[test]
    fn reads_record_by_engineered_column_names() {
        let json = serde_json::to_string(&input()).unwrap();
        assert!(json.contains("\"Years at Company\""));
        let back: PredictionInput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, input());
    }

    #[test]
    fn inconsistent_artifact_yields_none() {
        use crate::config::TrainingConfig;
        use crate::training::{base_spec, fixtures::separable};

        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::default().with_root(dir.path());
        config.ensure_dirs().unwrap();
        let data = separable(60, Feature::ALL.len(), 9);
        let mut model = base_spec(&TrainingConfig::default())
            .fit(data.x.view(), &data.y)
            .unwrap();
        model.save(&config.paths.model()).unwrap();
        assert!(predict(&config, &input()).unwrap().is_some());

        let n = Feature::ALL.len() - 1;
        model.classifier.coef = model.classifier.coef.slice(ndarray::s![..n]).to_owned();
        model.save(&config.paths.model()).unwrap();
        assert!(predict(&config, &input()).unwrap().is_none());
    }

    #[test]
    fn missing_artifact_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::default().with_root(dir.path());
        assert!(predict(&config, &input()).unwrap().is_none());
    }
}
