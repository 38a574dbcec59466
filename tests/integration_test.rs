//! Integration test: every stage over a synthetic employee file in a temp directory.

use attrition_pipeline::{
    cleaning,
    config::PipelineConfig,
    dataset::{self, Table},
    explore,
    features::{self, Feature},
    model::Solver,
    predict::{PredictionInput, Predictor},
    risk::Decision,
    split, training, validation, PipelineError,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::path::Path;

const HEADER: &str = "Employee ID,Age,Gender,Years at Company,Job Role,Monthly Income,\
Work-Life Balance,Job Satisfaction,Performance Rating,Number of Promotions,Overtime,\
Distance from Home,Education Level,Marital Status,Number of Dependents,Job Level,\
Company Size,Company Tenure,Remote Work,Leadership Opportunities,Innovation Opportunities,\
Company Reputation,Employee Recognition,Attrition";

fn pick<'a>(rng: &mut StdRng, options: &[&'a str]) -> &'a str {
    options.choose(rng).copied().unwrap_or(options[0])
}

/// Rows that pass validation; attrition leans on overtime, entry level and poor balance.
fn synthetic_csv(n: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = String::from(HEADER);
    for i in 0..n {
        let overtime = pick(&mut rng, &["Yes", "No"]);
        let level = pick(&mut rng, &["Entry", "Mid", "Senior"]);
        let balance = pick(&mut rng, &["Poor", "Fair", "Good", "Excellent"]);
        let years: u32 = rng.gen_range(0..=120);
        let tenure = years + rng.gen_range(0..=60);
        let mut risk = 0.15;
        if overtime == "Yes" {
            risk += 0.3;
        }
        if level == "Entry" {
            risk += 0.2;
        }
        if balance == "Poor" {
            risk += 0.2;
        }
        let attrition = if rng.gen_bool(risk) { "Left" } else { "Stayed" };
        let row = [
            (i + 1).to_string(),
            rng.gen_range(18..=65).to_string(),
            pick(&mut rng, &["Male", "Female"]).to_string(),
            years.to_string(),
            pick(&mut rng, &["Education", "Media", "Healthcare", "Technology", "Finance"]).to_string(),
            rng.gen_range(2000..=15000).to_string(),
            balance.to_string(),
            pick(&mut rng, &["Low", "Medium", "High", "Very High"]).to_string(),
            pick(&mut rng, &["Low", "Below Average", "Average", "High"]).to_string(),
            rng.gen_range(0..=4).to_string(),
            overtime.to_string(),
            rng.gen_range(1..=99).to_string(),
            pick(
                &mut rng,
                &["High School", "Bachelor's Degree", "Master's Degree", "Associate Degree", "PhD"],
            )
            .to_string(),
            pick(&mut rng, &["Single", "Married", "Divorced"]).to_string(),
            rng.gen_range(0..=5).to_string(),
            level.to_string(),
            pick(&mut rng, &["Small", "Medium", "Large"]).to_string(),
            tenure.to_string(),
            pick(&mut rng, &["Yes", "No"]).to_string(),
            pick(&mut rng, &["Yes", "No"]).to_string(),
            pick(&mut rng, &["Yes", "No"]).to_string(),
            pick(&mut rng, &["Poor", "Fair", "Good", "Excellent"]).to_string(),
            pick(&mut rng, &["Low", "Medium", "High", "Very High"]).to_string(),
            attrition.to_string(),
        ];
        out.push('\n');
        out.push_str(&row.join(","));
    }
    out.push('\n');
    out
}

fn setup(root: &Path, csv: &str) -> PipelineConfig {
    let mut config = PipelineConfig::default().with_root(root);
    config.tuning.c_grid = vec![0.1, 1.0];
    config.tuning.solvers = vec![Solver::Newton, Solver::Sag];
    config.ensure_dirs().unwrap();
    if let Some(parent) = config.paths.raw_data.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&config.paths.raw_data, csv).unwrap();
    config
}

/// Ingest through split
fn prepare(config: &PipelineConfig) {
    dataset::ingest(config).unwrap();
    validation::validate(config).unwrap();
    explore::explore(config).unwrap();
    cleaning::clean(config).unwrap();
    features::feature_engineering(config).unwrap();
    split::split(config).unwrap();
}

fn input() -> PredictionInput {
    PredictionInput {
        years_at_company: 2.0,
        performance_rating: 2.0,
        number_of_promotions: 0,
        overtime: 1,
        education_level: 2,
        number_of_dependents: 0,
        job_level: 1,
        company_size: 2,
        company_tenure: 3.0,
        remote_work: 0,
        company_reputation: 2.0,
        overall_satisfaction: 2.0,
        opportunities: 0.0,
        annual_income: 0,
        age_group: 1,
    }
}

#[test]
fn config_load_default() {
    let c = PipelineConfig::load(Path::new("nonexistent.json"));
    assert_eq!(c.split.test_size, 0.2);
    assert_eq!(c.split.seed, 42);
    assert_eq!(c.tuning.folds, 5);
}

#[test]
fn full_pipeline_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path(), &synthetic_csv(200, 11));
    prepare(&config);

    let train = Table::read_csv(&config.paths.train()).unwrap();
    let test = Table::read_csv(&config.paths.test()).unwrap();
    assert_eq!(train.rows.len() + test.rows.len(), 200);
    // per-class rounding can move the test size by one row
    assert!((39..=41).contains(&test.rows.len()));

    let model = training::train(&config).unwrap();
    assert_eq!(model.feature_columns, Feature::columns());
    assert!(config.paths.model().exists());

    let eval = training::evaluate(&config).unwrap();
    assert_eq!(eval.confusion.total(), test.rows.len());
    assert!((0.0..=1.0).contains(&eval.roc_auc));

    let scores = training::cross_validate(&config).unwrap();
    assert_eq!(scores.len(), 5);

    let outcome = training::tune(&config).unwrap();
    assert_eq!(outcome.grid.len(), 4);
    let metrics: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(config.paths.metrics()).unwrap()).unwrap();
    assert!(metrics.get("accuracy").and_then(|v| v.as_f64()).is_some());
    assert!(metrics.get("recall").and_then(|v| v.as_f64()).is_some());

    // tuned artifact still supports the full evaluation surface
    let again = training::evaluate(&config).unwrap();
    assert_eq!(again.accuracy, outcome.metrics.accuracy);

    // cross-validation now scores the tuned recipe
    let tuned = training::persisted_spec(&config).unwrap();
    assert_eq!(tuned.params, outcome.best_params);
    let train_data = training::Dataset::load(&config.paths.train()).unwrap();
    let expected = training::cross_val_score(&tuned, &train_data, 5, 42, training::Scoring::Recall).unwrap();
    assert_eq!(training::cross_validate(&config).unwrap(), expected);
}

#[test]
fn cross_validation_and_tuning_need_a_trained_model() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path(), &synthetic_csv(60, 16));
    prepare(&config);
    assert!(!config.paths.model().exists());

    assert!(matches!(training::cross_validate(&config), Err(PipelineError::Io(_))));
    assert!(matches!(training::tune(&config), Err(PipelineError::Io(_))));
    assert!(!config.paths.metrics().exists());
}

#[test]
fn engineered_header_matches_prediction_columns() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path(), &synthetic_csv(60, 12));
    prepare(&config);

    let engineered = Table::read_csv(&config.paths.featured()).unwrap();
    let without_target: Vec<String> = engineered
        .headers
        .iter()
        .filter(|h| h.as_str() != features::TARGET_COLUMN)
        .cloned()
        .collect();
    assert_eq!(without_target, Feature::columns());
    assert_eq!(input().feature_vector().unwrap().values.len(), without_target.len());
}

#[test]
fn split_is_byte_identical_across_reruns() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path(), &synthetic_csv(120, 13));
    prepare(&config);
    let train = std::fs::read(config.paths.train()).unwrap();
    let test = std::fs::read(config.paths.test()).unwrap();

    split::split(&config).unwrap();
    assert_eq!(std::fs::read(config.paths.train()).unwrap(), train);
    assert_eq!(std::fs::read(config.paths.test()).unwrap(), test);
}

#[test]
fn predict_scores_against_trained_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path(), &synthetic_csv(150, 14));
    prepare(&config);
    training::train(&config).unwrap();

    let predictor = Predictor::load(&config).expect("artifact loads");
    let result = predictor.predict(&input()).unwrap();
    assert!((result.p_stay + result.p_leave - 1.0).abs() < 1e-9);
    let expected = if result.p_leave >= 0.5 { Decision::Leave } else { Decision::Stay };
    assert_eq!(result.decision, expected);
}

#[test]
fn validation_failure_writes_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let csv = synthetic_csv(10, 15).replacen("\n1,", "\n0,", 1);
    let config = setup(dir.path(), &csv);
    dataset::ingest(&config).unwrap();

    let err = validation::validate(&config).unwrap_err();
    match err {
        PipelineError::Validation(report) => {
            assert!(report.failures.iter().any(|f| f.column == "Employee ID"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!config.paths.validation().exists());
}
