use super::metrics::{self, mean_std};
use super::Dataset;
use crate::config::{PipelineConfig, TuningConfig};
use crate::error::{PipelineError, Result};
use crate::features::Feature;
use crate::model::{AttritionModel, LogisticParams, ModelSpec};
use crate::split::stratified_folds;
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scoring {
    Accuracy,
    Recall,
}

impl Scoring {
    fn score(self, y_true: &[u8], y_pred: &[u8]) -> f64 {
        match self {
            Scoring::Accuracy => metrics::accuracy(y_true, y_pred),
            Scoring::Recall => metrics::recall(y_true, y_pred),
        }
    }
}

/// Fit a fresh model per stratified fold and score it on the held-out rows
pub fn cross_val_score(
    spec: &ModelSpec,
    data: &Dataset,
    folds: usize,
    seed: u64,
    scoring: Scoring,
) -> Result<Vec<f64>> {
    stratified_folds(&data.y, folds, seed)?
        .into_iter()
        .map(|(train_idx, val_idx)| {
            let train = data.select(&train_idx);
            let val = data.select(&val_idx);
            let model = spec.fit(train.x.view(), &train.y)?;
            Ok(scoring.score(&val.y, &model.predict(val.x.view())))
        })
        .collect()
}

/// Recipe of the persisted artifact; fails when none has been trained
pub fn persisted_spec(config: &PipelineConfig) -> Result<ModelSpec> {
    let model = AttritionModel::load(&config.paths.model())?;
    model.check_columns(&Feature::columns())?;
    Ok(model.spec())
}

/// Cross-validation stage: recall per fold of the persisted model's recipe on the train partition
pub fn cross_validate(config: &PipelineConfig) -> Result<Vec<f64>> {
    let spec = persisted_spec(config)?;
    let data = Dataset::load(&config.paths.train())?;
    let scores = cross_val_score(&spec, &data, config.tuning.folds, config.tuning.seed, Scoring::Recall)?;
    let (mean, _) = mean_std(&scores);
    info!(scores = ?scores, mean, "cross-validation recall");
    Ok(scores)
}

#[derive(Debug, Clone, Serialize)]
pub struct GridPoint {
    pub params: LogisticParams,
    pub fold_scores: Vec<f64>,
    pub mean_score: f64,
}

/// Exhaustive search over `C × solver × max_iter` by mean CV recall; earlier points win ties
pub fn grid_search(
    spec: &ModelSpec,
    data: &Dataset,
    tuning: &TuningConfig,
) -> Result<(LogisticParams, Vec<GridPoint>)> {
    if tuning.c_grid.is_empty() || tuning.solvers.is_empty() || tuning.max_iter_grid.is_empty() {
        return Err(PipelineError::InvalidParameter("empty tuning grid".to_string()));
    }
    let mut results = Vec::new();
    let mut best: Option<(f64, LogisticParams)> = None;
    for &c in &tuning.c_grid {
        for &solver in &tuning.solvers {
            for &max_iter in &tuning.max_iter_grid {
                let params = LogisticParams {
                    c,
                    solver,
                    max_iter,
                    ..spec.params.clone()
                };
                let fold_scores = cross_val_score(
                    &spec.with_params(params.clone()),
                    data,
                    tuning.folds,
                    tuning.seed,
                    Scoring::Recall,
                )?;
                let (mean_score, _) = mean_std(&fold_scores);
                debug!(c, solver = %solver, max_iter, mean_score, "grid point");
                if best.as_ref().map_or(true, |(score, _)| mean_score > *score) {
                    best = Some((mean_score, params.clone()));
                }
                results.push(GridPoint {
                    params,
                    fold_scores,
                    mean_score,
                });
            }
        }
    }
    let (_, params) = best.ok_or_else(|| PipelineError::InvalidParameter("empty tuning grid".to_string()))?;
    Ok((params, results))
}

/// Contents of the metrics file written after tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub accuracy: f64,
    pub recall: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TuningOutcome {
    pub best_params: LogisticParams,
    pub best_cv_recall: f64,
    pub grid: Vec<GridPoint>,
    pub metrics: Metrics,
    pub train_accuracy: f64,
    pub test_accuracy: f64,
    /// Mean and std of fold accuracy for the recipe the artifact held before tuning
    pub base_cv_accuracy: (f64, f64),
    pub tuned_cv_accuracy: (f64, f64),
}

/// Tuning stage: grid search around the persisted model, refit the winner on all training rows,
/// persist it and the metrics file
pub fn tune(config: &PipelineConfig) -> Result<TuningOutcome> {
    let base = persisted_spec(config)?;
    let train = Dataset::load(&config.paths.train())?;
    let test = Dataset::load(&config.paths.test())?;
    let tuning = &config.tuning;

    let (best_params, grid) = grid_search(&base, &train, tuning)?;
    let best_cv_recall = grid
        .iter()
        .find(|g| g.params == best_params)
        .map_or(0.0, |g| g.mean_score);
    info!(
        c = best_params.c,
        solver = %best_params.solver,
        max_iter = best_params.max_iter,
        recall = best_cv_recall,
        "best parameters"
    );

    let tuned = base.with_params(best_params.clone());
    let model: AttritionModel = tuned.fit(train.x.view(), &train.y)?;
    model.save(&config.paths.model())?;

    let pred = model.predict(test.x.view());
    let metrics = Metrics {
        accuracy: metrics::accuracy(&test.y, &pred),
        recall: metrics::recall(&test.y, &pred),
    };
    let train_accuracy = model.score(train.x.view(), &train.y);
    let test_accuracy = model.score(test.x.view(), &test.y);
    info!(accuracy = metrics.accuracy, recall = metrics.recall, "tuned model on test set");
    info!(train = train_accuracy, test = test_accuracy, "accuracy");

    let base_cv_accuracy = mean_std(&cross_val_score(&base, &train, tuning.folds, tuning.seed, Scoring::Accuracy)?);
    let tuned_cv_accuracy = mean_std(&cross_val_score(&tuned, &train, tuning.folds, tuning.seed, Scoring::Accuracy)?);
    info!(
        mean = base_cv_accuracy.0,
        std = base_cv_accuracy.1,
        "baseline cross-validation accuracy"
    );
    info!(
        mean = tuned_cv_accuracy.0,
        std = tuned_cv_accuracy.1,
        "tuned cross-validation accuracy"
    );

    let path = config.paths.metrics();
    std::fs::write(&path, serde_json::to_string_pretty(&metrics)?)?;
    info!(path = %path.display(), "metrics saved");

    Ok(TuningOutcome {
        best_params,
        best_cv_recall,
        grid,
        metrics,
        train_accuracy,
        test_accuracy,
        base_cv_accuracy,
        tuned_cv_accuracy,
    })
}
