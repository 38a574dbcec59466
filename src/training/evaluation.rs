use super::metrics::{self, ClassReport, ConfusionMatrix};
use super::Dataset;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::features::Feature;
use crate::model::AttritionModel;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub roc_auc: f64,
    pub confusion: ConfusionMatrix,
    pub report: Vec<ClassReport>,
    pub train_accuracy: f64,
    pub test_accuracy: f64,
    /// Largest absolute weight first
    pub coefficients: Vec<(String, f64)>,
}

pub fn evaluate_model(model: &AttritionModel, train: &Dataset, test: &Dataset) -> Evaluation {
    let proba = model.predict_proba(test.x.view());
    let p_leave: Vec<f64> = proba.column(1).to_vec();
    let pred = model.predict(test.x.view());

    let mut coefficients = model.coefficients();
    coefficients.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));

    Evaluation {
        accuracy: metrics::accuracy(&test.y, &pred),
        precision: metrics::precision(&test.y, &pred),
        recall: metrics::recall(&test.y, &pred),
        f1: metrics::f1(&test.y, &pred),
        roc_auc: metrics::roc_auc(&test.y, &p_leave),
        confusion: ConfusionMatrix::new(&test.y, &pred),
        report: metrics::classification_report(&test.y, &pred),
        train_accuracy: model.score(train.x.view(), &train.y),
        test_accuracy: model.score(test.x.view(), &test.y),
        coefficients,
    }
}

/// Evaluation stage: score the persisted artifact on both partitions
pub fn evaluate(config: &PipelineConfig) -> Result<Evaluation> {
    let model = AttritionModel::load(&config.paths.model())?;
    model.check_columns(&Feature::columns())?;
    let train = Dataset::load(&config.paths.train())?;
    let test = Dataset::load(&config.paths.test())?;

    let eval = evaluate_model(&model, &train, &test);
    info!(
        accuracy = eval.accuracy,
        precision = eval.precision,
        recall = eval.recall,
        f1 = eval.f1,
        roc_auc = eval.roc_auc,
        "test metrics"
    );
    let c = &eval.confusion;
    info!(tn = c.tn, fp = c.fp, fn_ = c.fn_, tp = c.tp, "confusion matrix");
    for r in &eval.report {
        info!(
            class = r.label,
            precision = r.precision,
            recall = r.recall,
            f1 = r.f1,
            support = r.support,
            "classification report"
        );
    }
    info!(train = eval.train_accuracy, test = eval.test_accuracy, "accuracy");
    for (name, weight) in &eval.coefficients {
        info!(feature = %name, coefficient = weight, "feature importance");
    }
    Ok(eval)
}
