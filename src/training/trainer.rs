use super::Dataset;
use crate::config::{PipelineConfig, TrainingConfig};
use crate::error::Result;
use crate::features::Feature;
use crate::model::{AttritionModel, LogisticParams, ModelSpec};
use tracing::info;

/// Recipe for the baseline model from the training section of the config
pub fn base_spec(training: &TrainingConfig) -> ModelSpec {
    ModelSpec {
        feature_columns: Feature::columns(),
        scaled_columns: training.scaled_columns.clone(),
        params: LogisticParams {
            c: training.c,
            max_iter: training.max_iter,
            tol: training.tol,
            class_weight_balanced: training.class_weight_balanced,
            solver: training.solver,
            seed: training.seed,
        },
    }
}

/// Training stage: fit on the train partition and persist the artifact
pub fn train(config: &PipelineConfig) -> Result<AttritionModel> {
    let data = Dataset::load(&config.paths.train())?;
    let spec = base_spec(&config.training);
    let model = spec.fit(data.x.view(), &data.y)?;

    let path = config.paths.model();
    model.save(&path)?;
    info!(
        rows = data.len(),
        solver = %model.params().solver,
        iterations = model.classifier.n_iter,
        path = %path.display(),
        "model trained and saved"
    );
    Ok(model)
}
