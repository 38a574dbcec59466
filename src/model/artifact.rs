//! Persisted model artifact: feature column list + scaler + classifier.
//! Input: [n, features] f64 in artifact column order. Output: [n, 2] = [p(stay), p(leave)].

use super::{LogisticParams, LogisticRegression, StandardScaler};
use crate::error::{PipelineError, Result};
use crate::features::FeatureVector;
use chrono::{DateTime, Utc};
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Columns and hyper-parameters needed to fit a fresh model (cross-validation, grid search)
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSpec {
    pub feature_columns: Vec<String>,
    pub scaled_columns: Vec<String>,
    pub params: LogisticParams,
}

impl ModelSpec {
    pub fn fit(&self, x: ArrayView2<'_, f64>, y: &[u8]) -> Result<AttritionModel> {
        AttritionModel::fit(
            x,
            y,
            self.feature_columns.clone(),
            &self.scaled_columns,
            self.params.clone(),
        )
    }

    pub fn with_params(&self, params: LogisticParams) -> Self {
        Self {
            params,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttritionModel {
    pub feature_columns: Vec<String>,
    pub scaler: StandardScaler,
    pub classifier: LogisticRegression,
    pub trained_at: DateTime<Utc>,
}

impl AttritionModel {
    /// Fit scaler and classifier. `scaled_columns` are looked up by name in `feature_columns`.
    pub fn fit(
        x: ArrayView2<'_, f64>,
        y: &[u8],
        feature_columns: Vec<String>,
        scaled_columns: &[String],
        params: LogisticParams,
    ) -> Result<Self> {
        if x.ncols() != feature_columns.len() {
            return Err(PipelineError::InvalidParameter(format!(
                "{} columns in data, {} names",
                x.ncols(),
                feature_columns.len()
            )));
        }
        let scaled_idx = scaled_columns
            .iter()
            .map(|name| {
                feature_columns
                    .iter()
                    .position(|c| c == name)
                    .ok_or_else(|| PipelineError::MissingColumn {
                        column: name.clone(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let scaler = StandardScaler::fit(x, &scaled_idx);
        let xs = scaler.transform(x);
        let mut classifier = LogisticRegression::new(params);
        classifier.fit(xs.view(), y)?;
        Ok(Self {
            feature_columns,
            scaler,
            classifier,
            trained_at: Utc::now(),
        })
    }

    /// The unfitted recipe this model was trained from
    pub fn spec(&self) -> ModelSpec {
        ModelSpec {
            feature_columns: self.feature_columns.clone(),
            scaled_columns: self
                .scaler
                .columns
                .iter()
                .filter_map(|i| self.feature_columns.get(*i).cloned())
                .collect(),
            params: self.classifier.params.clone(),
        }
    }

    /// Internal shape consistency: one weight per column, scaler indices in range
    pub fn validate(&self) -> Result<()> {
        let n = self.feature_columns.len();
        if n == 0 {
            return Err(PipelineError::InvalidParameter("artifact has no feature columns".to_string()));
        }
        let coef = self.classifier.coef.len();
        if coef != n {
            return Err(PipelineError::InvalidParameter(format!(
                "artifact has {} coefficients for {} feature columns",
                coef, n
            )));
        }
        let scaler = &self.scaler;
        if scaler.mean.len() != scaler.columns.len() || scaler.scale.len() != scaler.columns.len() {
            return Err(PipelineError::InvalidParameter(format!(
                "scaler has {} columns, {} means, {} scales",
                scaler.columns.len(),
                scaler.mean.len(),
                scaler.scale.len()
            )));
        }
        if let Some(c) = scaler.columns.iter().find(|c| **c >= n) {
            return Err(PipelineError::InvalidParameter(format!(
                "scaler column index {} out of range for {} features",
                c, n
            )));
        }
        if scaler.scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
            return Err(PipelineError::InvalidParameter("scaler has a zero or non-finite scale".to_string()));
        }
        Ok(())
    }

    pub fn params(&self) -> &LogisticParams {
        &self.classifier.params
    }

    /// Fail unless `columns` are exactly the artifact's columns, in order
    pub fn check_columns(&self, columns: &[String]) -> Result<()> {
        if columns != self.feature_columns.as_slice() {
            return Err(PipelineError::SchemaMismatch {
                expected: self.feature_columns.clone(),
                found: columns.to_vec(),
            });
        }
        Ok(())
    }

    pub fn predict_proba(&self, x: ArrayView2<'_, f64>) -> Array2<f64> {
        let xs = self.scaler.transform(x);
        self.classifier.predict_proba(xs.view())
    }

    /// [p(stay), p(leave)] for one row
    pub fn predict_one(&self, features: &FeatureVector) -> Result<[f64; 2]> {
        let values = features.as_slice();
        if values.len() != self.feature_columns.len() {
            return Err(PipelineError::InvalidParameter(format!(
                "expected {} features, got {}",
                self.feature_columns.len(),
                values.len()
            )));
        }
        let x = Array2::from_shape_vec((1, values.len()), values.to_vec())
            .map_err(|e| PipelineError::InvalidParameter(e.to_string()))?;
        let p = self.predict_proba(x.view());
        Ok([p[[0, 0]], p[[0, 1]]])
    }

    /// Hard labels: leave when p(leave) > 0.5
    pub fn predict(&self, x: ArrayView2<'_, f64>) -> Vec<u8> {
        self.predict_proba(x)
            .rows()
            .into_iter()
            .map(|r| u8::from(r[1] > 0.5))
            .collect()
    }

    /// Mean accuracy
    pub fn score(&self, x: ArrayView2<'_, f64>, y: &[u8]) -> f64 {
        let pred = self.predict(x);
        if y.is_empty() {
            return 0.0;
        }
        let hits = pred.iter().zip(y).filter(|(p, t)| p == t).count();
        hits as f64 / y.len() as f64
    }

    /// Coefficients on the scaled inputs, named by feature
    pub fn coefficients(&self) -> Vec<(String, f64)> {
        self.feature_columns
            .iter()
            .cloned()
            .zip(self.classifier.coef().iter().copied())
            .collect()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Read and shape-check a saved artifact
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let model: Self = serde_json::from_str(&data)?;
        model.validate()?;
        Ok(model)
    }
}
