//! Model fitting, evaluation, cross-validation and hyper-parameter search over the
//! train/test partitions written by the split stage.

mod evaluation;
pub mod metrics;
mod trainer;
mod tuning;

pub use evaluation::{evaluate, evaluate_model, Evaluation};
pub use trainer::{base_spec, train};
pub use tuning::{
    cross_val_score, cross_validate, grid_search, persisted_spec, tune, GridPoint, Metrics, Scoring, TuningOutcome,
};

use crate::dataset::read_records;
use crate::error::{PipelineError, Result};
use crate::features::{EngineeredRecord, FeatureVector};
use ndarray::{Array2, Axis};
use std::path::Path;

/// Design matrix in `Feature::ALL` order plus 0/1 attrition labels
#[derive(Debug, Clone)]
pub struct Dataset {
    pub x: Array2<f64>,
    pub y: Vec<u8>,
}

impl Dataset {
    pub fn from_records(records: &[EngineeredRecord]) -> Result<Self> {
        if records.is_empty() {
            return Err(PipelineError::EmptyDataset);
        }
        let mut values = Vec::new();
        let mut width = 0;
        for (row, rec) in records.iter().enumerate() {
            let fv = FeatureVector::collect(row, |f| rec.value(f))?;
            width = fv.values.len();
            values.extend(fv.values);
        }
        let x = Array2::from_shape_vec((records.len(), width), values)
            .map_err(|e| PipelineError::InvalidParameter(e.to_string()))?;
        let y = records.iter().map(|r| r.attrition).collect();
        Ok(Self { x, y })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let records: Vec<EngineeredRecord> = read_records(path)?;
        Self::from_records(&records)
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Rows at `idx`, in that order
    pub fn select(&self, idx: &[usize]) -> Self {
        Self {
            x: self.x.select(Axis(0), idx),
            y: idx.iter().map(|i| self.y[*i]).collect(),
        }
    }
}
