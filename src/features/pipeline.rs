//! Batch feature engineering: cleaned records → engineered records.

use super::binning::{AGE_BINS, ANNUAL_INCOME_BINS};
use super::derived::{months_to_years, RelationshipFeatures};
use super::encoding::{encode_binary, encode_label, Encoded, OrdinalScale};
use super::record::{EmployeeRecord, EngineeredRecord};
use crate::config::PipelineConfig;
use crate::dataset::{read_records, require_headers, write_records};
use crate::error::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// A raw category that fell outside its table and was nulled
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmappedValue {
    pub row: usize,
    pub column: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Default)]
pub struct EngineeredBatch {
    pub records: Vec<EngineeredRecord>,
    pub unmapped: Vec<UnmappedValue>,
}

impl EngineeredBatch {
    /// Unmapped value count per column
    pub fn unmapped_by_column(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for u in &self.unmapped {
            *counts.entry(u.column).or_insert(0) += 1;
        }
        counts
    }
}

struct Encoder<'a> {
    row: usize,
    unmapped: &'a mut Vec<UnmappedValue>,
}

impl Encoder<'_> {
    fn keep(&mut self, column: &'static str, e: Encoded) -> Option<i64> {
        if let Encoded::Unmapped(value) = &e {
            self.unmapped.push(UnmappedValue {
                row: self.row,
                column,
                value: value.clone(),
            });
        }
        e.value()
    }

    fn ordinal(&mut self, scale: OrdinalScale, raw: &str) -> Option<i64> {
        self.keep(scale.column(), scale.encode(raw))
    }

    fn binary(&mut self, column: &'static str, raw: &str) -> Option<i64> {
        self.keep(column, encode_binary(raw))
    }
}

/// Engineer one record; unmapped categories are appended to `unmapped`.
pub fn engineer_record(
    rec: &EmployeeRecord,
    row: usize,
    unmapped: &mut Vec<UnmappedValue>,
) -> Result<EngineeredRecord> {
    let attrition = encode_label(&rec.attrition, row)?;
    let mut enc = Encoder { row, unmapped };

    let remote_work = enc.binary("Remote Work", &rec.remote_work);
    let leadership = enc.binary("Leadership Opportunities", &rec.leadership_opportunities);
    let innovation = enc.binary("Innovation Opportunities", &rec.innovation_opportunities);
    let overtime = enc.binary("Overtime", &rec.overtime);

    let work_life = enc.ordinal(OrdinalScale::WorkLifeBalance, &rec.work_life_balance);
    let job_satisfaction = enc.ordinal(OrdinalScale::JobSatisfaction, &rec.job_satisfaction);
    let performance_rating = enc.ordinal(OrdinalScale::PerformanceRating, &rec.performance_rating);
    let recognition = enc.ordinal(OrdinalScale::EmployeeRecognition, &rec.employee_recognition);
    let company_reputation = enc.ordinal(OrdinalScale::CompanyReputation, &rec.company_reputation);
    let job_level = enc.ordinal(OrdinalScale::JobLevel, &rec.job_level);
    let company_size = enc.ordinal(OrdinalScale::CompanySize, &rec.company_size);
    let education_level = enc.ordinal(OrdinalScale::EducationLevel, &rec.education_level);

    let overall_satisfaction = match (work_life, job_satisfaction, recognition) {
        (Some(a), Some(b), Some(c)) => Some(((a + b + c) as f64 / 3.0).round_ties_even() as i64),
        _ => None,
    };
    let opportunities = leadership.zip(innovation).map(|(l, i)| l + i);

    let annual_income = ANNUAL_INCOME_BINS.assign(rec.monthly_income * 12.0);
    let age_group = AGE_BINS.assign(rec.age);

    let years_at_company = months_to_years(rec.years_at_company);
    let company_tenure = months_to_years(rec.company_tenure);
    let rel = RelationshipFeatures::derive(years_at_company, company_tenure, job_level);

    Ok(EngineeredRecord {
        years_at_company,
        performance_rating,
        number_of_promotions: rec.number_of_promotions,
        overtime,
        education_level,
        number_of_dependents: rec.number_of_dependents,
        job_level,
        company_size,
        company_tenure,
        remote_work,
        company_reputation,
        attrition,
        overall_satisfaction,
        opportunities,
        annual_income,
        age_group,
        role_stagnation_ratio: rel.role_stagnation_ratio,
        tenure_gap: rel.tenure_gap,
        early_company_tenure_risk: rel.early_company_tenure_risk,
        long_tenure_low_role_risk: rel.long_tenure_low_role_risk,
    })
}

/// Engineer a whole batch. Fails only on an unknown Attrition label.
pub fn engineer(records: &[EmployeeRecord]) -> Result<EngineeredBatch> {
    let mut batch = EngineeredBatch {
        records: Vec::with_capacity(records.len()),
        unmapped: Vec::new(),
    };
    for (row, rec) in records.iter().enumerate() {
        let out = engineer_record(rec, row, &mut batch.unmapped)?;
        batch.records.push(out);
    }
    Ok(batch)
}

/// Feature engineering stage: cleaning file → engineered file
pub fn feature_engineering(config: &PipelineConfig) -> Result<Vec<EngineeredRecord>> {
    let input = config.paths.cleaning();
    require_headers(&input, &EmployeeRecord::COLUMNS)?;
    let records: Vec<EmployeeRecord> = read_records(&input)?;
    info!(rows = records.len(), "engineering features");

    let batch = engineer(&records)?;
    for (column, count) in batch.unmapped_by_column() {
        warn!(column, count, "unmapped categories encoded as null");
    }
    if let Some(last) = batch.records.last() {
        debug!(record = ?last, "last engineered record");
    }

    let out = config.paths.featured();
    write_records(&out, &batch.records)?;
    info!(path = %out.display(), rows = batch.records.len(), "features written");
    Ok(batch.records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;

    fn write_cleaning(config: &PipelineConfig, records: &[EmployeeRecord], drop: &str) {
        config.ensure_dirs().unwrap();
        let scratch = config.paths.featured().with_extension("full.csv");
        write_records(&scratch, records).unwrap();
        let mut reader = csv::Reader::from_path(&scratch).unwrap();
        let headers = reader.headers().unwrap().clone();
        let keep: Vec<usize> = (0..headers.len()).filter(|&i| &headers[i] != drop).collect();
        let mut writer = csv::Writer::from_path(config.paths.cleaning()).unwrap();
        writer.write_record(keep.iter().map(|&i| &headers[i])).unwrap();
        for row in reader.records() {
            let row = row.unwrap();
            writer.write_record(keep.iter().map(|&i| &row[i])).unwrap();
        }
        writer.flush().unwrap();
    }

    fn employee() -> EmployeeRecord {
        EmployeeRecord {
            age: 31.0,
            years_at_company: 36.0,
            monthly_income: 30_000.0,
            work_life_balance: "Excellent".into(),
            job_satisfaction: "Medium".into(),
            performance_rating: "Average".into(),
            number_of_promotions: 2,
            overtime: "No".into(),
            education_level: "Associate Degree".into(),
            number_of_dependents: Some(0),
            job_level: "Mid".into(),
            company_size: "Medium".into(),
            company_tenure: 72.0,
            remote_work: "No".into(),
            leadership_opportunities: "Yes".into(),
            innovation_opportunities: "No".into(),
            company_reputation: "Excellent".into(),
            employee_recognition: "Medium".into(),
            attrition: "Stayed".into(),
        }
    }

    #[test]
    fn engineers_a_typical_record() {
        let batch = engineer(&[employee()]).unwrap();
        let r = &batch.records[0];
        assert!(batch.unmapped.is_empty());
        assert_eq!(r.attrition, 0);
        assert_eq!(r.years_at_company, 3.0);
        assert_eq!(r.company_tenure, 6.0);
        assert_eq!(r.role_stagnation_ratio, 0.429);
        assert_eq!(r.tenure_gap, 3.0);
        assert_eq!(r.early_company_tenure_risk, 0);
        assert_eq!(r.long_tenure_low_role_risk, 1);
        // (4 + 2 + 2) / 3 = 2.67
        assert_eq!(r.overall_satisfaction, Some(3));
        assert_eq!(r.opportunities, Some(1));
        assert_eq!(r.annual_income, Some(1));
        assert_eq!(r.age_group, Some(2));
        assert_eq!(r.education_level, Some(4));
        assert_eq!(r.remote_work, Some(0));
    }

    #[test]
    fn unmapped_values_become_null_and_are_reported() {
        let mut e = employee();
        e.job_level = "Executive".into();
        e.leadership_opportunities = "Sometimes".into();
        let batch = engineer(&[e]).unwrap();
        let r = &batch.records[0];
        assert_eq!(r.job_level, None);
        assert_eq!(r.opportunities, None);
        // an unranked level never counts as low
        assert_eq!(r.long_tenure_low_role_risk, 0);
        assert_eq!(batch.unmapped.len(), 2);
        assert_eq!(batch.unmapped_by_column().get("Job Level"), Some(&1));
    }

    #[test]
    fn unknown_label_fails_the_batch() {
        let mut e = employee();
        e.attrition = "Unknown".into();
        assert!(engineer(&[employee(), e]).is_err());
    }

    #[test]
    fn satisfaction_is_null_if_any_source_is() {
        let mut e = employee();
        e.employee_recognition = "Extreme".into();
        let batch = engineer(&[e]).unwrap();
        assert_eq!(batch.records[0].overall_satisfaction, None);
    }

    #[test]
    fn stage_reads_complete_cleaning_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::default().with_root(dir.path());
        write_cleaning(&config, &[employee(), employee()], "");
        let records = feature_engineering(&config).unwrap();
        assert_eq!(records.len(), 2);
        assert!(config.paths.featured().exists());
    }

    #[test]
    fn missing_required_column_fails_the_stage() {
        for column in ["Overtime", "Education Level", "Number of Dependents"] {
            let dir = tempfile::tempdir().unwrap();
            let config = PipelineConfig::default().with_root(dir.path());
            write_cleaning(&config, &[employee()], column);
            match feature_engineering(&config) {
                Err(PipelineError::MissingColumn { column: missing }) => assert_eq!(missing, column),
                other => panic!("expected missing {column}, got {other:?}"),
            }
            assert!(!config.paths.featured().exists());
        }
    }
}
