//! Attrition classifier: column standardization + L2 logistic regression, persisted as JSON.

mod artifact;
mod logistic;
mod scaler;

pub use artifact::{AttritionModel, ModelSpec};
pub use logistic::{LogisticParams, LogisticRegression};
pub use scaler::StandardScaler;

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Solver {
    /// Iteratively reweighted least squares (exact Newton steps)
    Newton,
    /// Stochastic average gradient
    Sag,
}

impl fmt::Display for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Solver::Newton => write!(f, "newton"),
            Solver::Sag => write!(f, "sag"),
        }
    }
}
