//! Model registry - loaded classifiers shared by all requests

use std::path::Path;
use std::sync::Arc;

use collectiq_model::{GradientBoostedClassifier, ModelResult, ModelVersion};

use crate::config::Config;

/// Both served model versions, immutable after startup
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    v1: Arc<GradientBoostedClassifier>,
    v2: Arc<GradientBoostedClassifier>,
}

impl ModelRegistry {
    pub fn new(v1: GradientBoostedClassifier, v2: GradientBoostedClassifier) -> Self {
        Self {
            v1: Arc::new(v1),
            v2: Arc::new(v2),
        }
    }

    pub fn load(v1_path: &Path, v2_path: &Path) -> ModelResult<Self> {
        let v1 = GradientBoostedClassifier::load(v1_path)?;
        let v2 = GradientBoostedClassifier::load(v2_path)?;
        Ok(Self::new(v1, v2))
    }

    pub fn from_config(config: &Config) -> ModelResult<Self> {
        Self::load(
            config.model_path(ModelVersion::V1),
            config.model_path(ModelVersion::V2),
        )
    }

    pub fn get(&self, version: ModelVersion) -> &GradientBoostedClassifier {
        match version {
            ModelVersion::V1 => self.v1.as_ref(),
            ModelVersion::V2 => self.v2.as_ref(),
        }
    }
}
