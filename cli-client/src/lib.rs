//! CollectIQ terminal client
//!
//! Collects invoice attributes, calls the prediction API and prints the
//! risk band, recommended action and tone. Also shows the live prediction
//! stats and the model's feature importance.

pub mod api;
pub mod cli;
pub mod error;
pub mod report;

pub use api::{ApiClient, FeatureImportance, HealthStatus, Prediction, SystemStats};
pub use error::{ClientError, ClientResult};
pub use report::RiskReport;
