//! Pipeline configuration. Every stage receives it explicitly; there are no global paths.

use crate::model::Solver;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Raw input, stage outputs and artifacts
    pub paths: PathsConfig,
    /// Train/test partitioning
    pub split: SplitConfig,
    /// Base model hyper-parameters
    pub training: TrainingConfig,
    /// Grid search
    pub tuning: TuningConfig,
    /// Prediction decision and risk thresholds
    pub risk: RiskConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub raw_data: PathBuf,
    /// Directory holding the intermediate stage CSVs
    pub data_prep_dir: PathBuf,
    /// Directory holding the model artifact and metrics
    pub artifact_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Share of each class sent to the test partition (0.0–1.0)
    pub test_size: f64,
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Inverse L2 regularization strength
    pub c: f64,
    pub max_iter: usize,
    pub tol: f64,
    pub class_weight_balanced: bool,
    pub solver: Solver,
    /// Columns standardized before fitting; the rest pass through
    pub scaled_columns: Vec<String>,
    /// Seed for the stochastic solver
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    pub c_grid: Vec<f64>,
    pub solvers: Vec<Solver>,
    pub max_iter_grid: Vec<usize>,
    pub folds: usize,
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// p_leave at or above this predicts "leave"
    pub decision_threshold: f64,
    pub high_threshold: f64,
    pub medium_threshold: f64,
    pub low_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            split: SplitConfig::default(),
            training: TrainingConfig::default(),
            tuning: TuningConfig::default(),
            risk: RiskConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_data: PathBuf::from("datasets/employee_attrition.csv"),
            data_prep_dir: PathBuf::from("datasets/data-preparation"),
            artifact_dir: PathBuf::from("artifacts"),
        }
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            seed: 42,
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 1000,
            tol: 1e-6,
            class_weight_balanced: true,
            solver: Solver::Newton,
            scaled_columns: vec![
                "Years at Company".to_string(),
                "Company Tenure".to_string(),
                "RoleStagnationRatio".to_string(),
                "TenureGap".to_string(),
            ],
            seed: 42,
        }
    }
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            c_grid: vec![0.01, 0.1, 1.0, 10.0, 100.0],
            solvers: vec![Solver::Newton, Solver::Sag],
            max_iter_grid: vec![1000],
            folds: 5,
            seed: 42,
        }
    }
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            decision_threshold: 0.50,
            high_threshold: 0.65,
            medium_threshold: 0.45,
            low_threshold: 0.25,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl PathsConfig {
    pub fn ingestion(&self) -> PathBuf {
        self.data_prep_dir.join("01_ingestion.csv")
    }

    pub fn validation(&self) -> PathBuf {
        self.data_prep_dir.join("02_validation.csv")
    }

    pub fn eda(&self) -> PathBuf {
        self.data_prep_dir.join("03_eda_df.csv")
    }

    pub fn cleaning(&self) -> PathBuf {
        self.data_prep_dir.join("04_cleaning.csv")
    }

    pub fn featured(&self) -> PathBuf {
        self.data_prep_dir.join("05_feature_engg_df.csv")
    }

    pub fn train(&self) -> PathBuf {
        self.data_prep_dir.join("06_train_df.csv")
    }

    pub fn test(&self) -> PathBuf {
        self.data_prep_dir.join("06_test_df.csv")
    }

    pub fn model(&self) -> PathBuf {
        self.artifact_dir.join("model.json")
    }

    pub fn metrics(&self) -> PathBuf {
        self.artifact_dir.join("metrics.json")
    }
}

impl PipelineConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            if let Ok(data) = std::fs::read_to_string(path) {
                if let Ok(c) = serde_json::from_str::<PipelineConfig>(&data) {
                    return c;
                }
            }
        }
        Self::default()
    }

    /// Create the stage and artifact directories
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.paths.data_prep_dir)?;
        std::fs::create_dir_all(&self.paths.artifact_dir)
    }

    /// Rebase every path onto `root`
    pub fn with_root(mut self, root: &Path) -> Self {
        self.paths.raw_data = root.join(&self.paths.raw_data);
        self.paths.data_prep_dir = root.join(&self.paths.data_prep_dir);
        self.paths.artifact_dir = root.join(&self.paths.artifact_dir);
        self
    }
}
