//! Employee attrition pipeline: file-based stages from raw CSV to a persisted
//! logistic-regression artifact and single-record risk scoring.
//!
//! Stages, each reading the previous stage's file:
//! - [`dataset`] — ingestion of the raw CSV
//! - [`validation`] — lazy schema checks
//! - [`explore`] / [`cleaning`] — descriptive reports
//! - [`features`] — encodings, bins and relationship features
//! - [`split`] — stratified train/test partition
//! - [`training`] — fit, evaluate, cross-validate, tune
//! - [`predict`] — score one record against the artifact, see [`risk`]

pub mod cleaning;
pub mod config;
pub mod dataset;
pub mod error;
pub mod explore;
pub mod features;
pub mod logging;
pub mod model;
pub mod predict;
pub mod risk;
pub mod split;
pub mod training;
pub mod validation;

pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use features::{Feature, FeatureVector, RelationshipFeatures};
pub use logging::StructuredLogger;
pub use model::AttritionModel;
pub use predict::{PredictionInput, Predictor};
pub use risk::RiskEngine;
