//! CollectIQ Model Core
//!
//! Late-payment risk classifier for invoices.
//!
//! - [`dataset`]: CSV loading and seeded train/test split
//! - [`gbdt`]: gradient-boosted tree classifier (fit, predict, persist)
//! - [`metrics`]: ROC-AUC and classification report
//! - [`policy`]: probability → tone, action and risk level
//! - [`training`]: trains and compares the `v1`/`v2` presets

pub mod dataset;
pub mod error;
pub mod features;
pub mod gbdt;
pub mod metrics;
pub mod policy;
pub mod training;
pub mod version;

pub use dataset::Dataset;
pub use error::{ModelError, ModelResult};
pub use features::{FeatureVector, InvoiceFeatures, FEATURE_COUNT, FEATURE_NAMES};
pub use gbdt::{BoosterParams, GradientBoostedClassifier};
pub use policy::{RecommendedAction, Reminder, RiskAssessment, RiskLevel, ThresholdConfig, Tone};
pub use version::ModelVersion;
