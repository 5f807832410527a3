//! Booster hyperparameters

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Tree booster configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoosterParams {
    /// Boosting rounds (one tree each)
    pub n_estimators: usize,

    /// Maximum tree depth (root = 0)
    pub max_depth: usize,

    /// Shrinkage applied to every leaf
    pub learning_rate: f64,

    /// Row sampling ratio per tree (0, 1]
    pub subsample: f64,

    /// Column sampling ratio per tree (0, 1]
    pub colsample_bytree: f64,

    /// L2 regularization on leaf weights
    pub reg_lambda: f64,

    /// Minimum loss reduction to keep a split
    pub gamma: f64,

    /// Minimum hessian sum per child
    pub min_child_weight: f64,

    /// RNG seed for row/column sampling
    pub seed: u64,
}

impl Default for BoosterParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: 6,
            learning_rate: 0.3,
            subsample: 1.0,
            colsample_bytree: 1.0,
            reg_lambda: 1.0,
            gamma: 0.0,
            min_child_weight: 1.0,
            seed: 0,
        }
    }
}

impl BoosterParams {
    /// Baseline preset
    pub fn v1() -> Self {
        Self {
            n_estimators: 100,
            max_depth: 3,
            learning_rate: 0.1,
            seed: 42,
            ..Default::default()
        }
    }

    /// Deeper, slower-learning preset with row and column sampling
    pub fn v2() -> Self {
        Self {
            n_estimators: 250,
            max_depth: 5,
            learning_rate: 0.05,
            subsample: 0.8,
            colsample_bytree: 0.8,
            seed: 42,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> ModelResult<()> {
        let ratio_ok = |v: f64| v > 0.0 && v <= 1.0;

        if self.n_estimators == 0 {
            return Err(ModelError::InvalidParameter("n_estimators must be > 0".into()));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(ModelError::InvalidParameter(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if !ratio_ok(self.subsample) {
            return Err(ModelError::InvalidParameter(format!(
                "subsample must be in (0, 1], got {}",
                self.subsample
            )));
        }
        if !ratio_ok(self.colsample_bytree) {
            return Err(ModelError::InvalidParameter(format!(
                "colsample_bytree must be in (0, 1], got {}",
                self.colsample_bytree
            )));
        }
        if self.reg_lambda < 0.0 || self.gamma < 0.0 || self.min_child_weight < 0.0 {
            return Err(ModelError::InvalidParameter(
                "reg_lambda, gamma and min_child_weight must be non-negative".into(),
            ));
        }
        Ok(())
    }
}
