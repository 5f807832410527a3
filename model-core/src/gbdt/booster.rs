//! Gradient Boosted Classifier
//!
//! Logistic loss, margin starts at zero (p = 0.5). Each round fits one
//! tree to the current gradients and adds it to every row's margin.
//! Models round-trip through JSON for the trainer and the API.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::params::BoosterParams;
use super::sigmoid;
use super::tree::{RegressionTree, TreeBuilder};
use crate::dataset::Dataset;
use crate::error::{ModelError, ModelResult};
use crate::features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};

/// Hessian floor so leaf weights stay finite on saturated rows
const MIN_HESSIAN: f64 = 1e-16;

/// Training provenance stored with the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetadata {
    pub trained_at: DateTime<Utc>,
    pub training_rows: usize,
    pub positive_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoostedClassifier {
    params: BoosterParams,
    feature_names: Vec<String>,
    base_margin: f64,
    trees: Vec<RegressionTree>,
    metadata: TrainingMetadata,
}

impl GradientBoostedClassifier {
    /// Fit a model on `dataset`
    pub fn fit(dataset: &Dataset, params: BoosterParams) -> ModelResult<Self> {
        params.validate()?;
        if dataset.is_empty() {
            return Err(ModelError::EmptyDataset);
        }

        let features = dataset.features();
        let labels = dataset.labels();
        let n = dataset.len();

        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut margins = vec![0.0; n];
        let mut grad = vec![0.0; n];
        let mut hess = vec![0.0; n];
        let mut trees = Vec::with_capacity(params.n_estimators);

        let n_columns = ((FEATURE_COUNT as f64 * params.colsample_bytree).round() as usize)
            .clamp(1, FEATURE_COUNT);

        for round in 0..params.n_estimators {
            for i in 0..n {
                let p = sigmoid(margins[i]);
                grad[i] = p - labels[i];
                hess[i] = (p * (1.0 - p)).max(MIN_HESSIAN);
            }

            let rows = sample_rows(n, params.subsample, &mut rng);
            let columns = sample_columns(n_columns, &mut rng);

            let tree = TreeBuilder {
                features,
                grad: &grad,
                hess: &hess,
                columns: &columns,
                params: &params,
            }
            .build(&rows);

            for (margin, row) in margins.iter_mut().zip(features) {
                *margin += tree.predict(row);
            }
            trees.push(tree);

            if (round + 1) % 50 == 0 {
                log::debug!("Boosting round {}/{}: logloss {:.5}", round + 1, params.n_estimators, log_loss(&margins, labels));
            }
        }

        log::info!(
            "Trained {} trees (max_depth={}, lr={}) on {} rows",
            trees.len(),
            params.max_depth,
            params.learning_rate,
            n
        );

        Ok(Self {
            params,
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            base_margin: 0.0,
            trees,
            metadata: TrainingMetadata {
                trained_at: Utc::now(),
                training_rows: n,
                positive_rate: dataset.positive_rate(),
            },
        })
    }

    /// Raw log-odds for one row
    pub fn predict_margin(&self, row: &FeatureVector) -> f64 {
        self.base_margin + self.trees.iter().map(|t| t.predict(row)).sum::<f64>()
    }

    /// Probability of the positive (late) class, in [0, 1]
    pub fn predict_proba(&self, row: &FeatureVector) -> f64 {
        sigmoid(self.predict_margin(row)).clamp(0.0, 1.0)
    }

    pub fn predict_proba_batch(&self, rows: &[FeatureVector]) -> Vec<f64> {
        rows.iter().map(|row| self.predict_proba(row)).collect()
    }

    /// Number of splits per feature across all trees.
    ///
    /// Features that never split are omitted.
    pub fn feature_importance(&self) -> BTreeMap<String, usize> {
        let mut counts = [0usize; FEATURE_COUNT];
        for tree in &self.trees {
            tree.accumulate_splits(&mut counts);
        }

        self.feature_names
            .iter()
            .zip(counts)
            .filter(|(_, count)| *count > 0)
            .map(|(name, count)| (name.clone(), count))
            .collect()
    }

    pub fn params(&self) -> &BoosterParams {
        &self.params
    }

    pub fn metadata(&self) -> &TrainingMetadata {
        &self.metadata
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Write the model as JSON, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> ModelResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string(self)?;
        fs::write(path, json)?;
        log::info!("Model saved to {}", path.display());
        Ok(())
    }

    /// Read a model and check it matches the current feature layout
    pub fn load(path: impl AsRef<Path>) -> ModelResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let model: Self = serde_json::from_str(&json)?;
        model.check_layout()?;

        log::info!(
            "Model loaded from {} ({} trees, trained {})",
            path.display(),
            model.n_trees(),
            model.metadata.trained_at.format("%Y-%m-%d %H:%M:%S")
        );
        Ok(model)
    }

    fn check_layout(&self) -> ModelResult<()> {
        if self.feature_names.len() != FEATURE_COUNT {
            return Err(ModelError::FeatureMismatch {
                expected: FEATURE_COUNT,
                actual: self.feature_names.len(),
            });
        }
        if let Some((expected, actual)) = FEATURE_NAMES
            .iter()
            .zip(&self.feature_names)
            .find(|(expected, actual)| **expected != actual.as_str())
        {
            return Err(ModelError::CorruptModel(format!(
                "feature column '{}' found where '{}' was expected",
                actual, expected
            )));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate()
                .map_err(|e| ModelError::CorruptModel(format!("tree {}: {}", i, e)))?;
        }
        Ok(())
    }
}

/// Bernoulli row sample; falls back to all rows if the draw is empty
fn sample_rows(n: usize, ratio: f64, rng: &mut StdRng) -> Vec<usize> {
    if ratio >= 1.0 {
        return (0..n).collect();
    }

    let rows: Vec<usize> = (0..n).filter(|_| rng.gen::<f64>() < ratio).collect();
    if rows.is_empty() {
        (0..n).collect()
    } else {
        rows
    }
}

fn sample_columns(count: usize, rng: &mut StdRng) -> Vec<usize> {
    let mut columns: Vec<usize> = (0..FEATURE_COUNT).collect();
    if count < FEATURE_COUNT {
        columns.shuffle(rng);
        columns.truncate(count);
        columns.sort_unstable();
    }
    columns
}

fn log_loss(margins: &[f64], labels: &[f64]) -> f64 {
    let eps = 1e-15;
    let total: f64 = margins
        .iter()
        .zip(labels)
        .map(|(&m, &y)| {
            let p = sigmoid(m).clamp(eps, 1.0 - eps);
            -(y * p.ln() + (1.0 - y) * (1.0 - p).ln())
        })
        .sum();
    total / margins.len().max(1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Late payments driven by delay and low reliability
    fn synthetic_dataset(n: usize) -> Dataset {
        let mut dataset = Dataset::new();
        for i in 0..n {
            let delay = (i % 30) as f64;
            let reliability = ((i * 7) % 100) as f64 / 100.0;
            let amount = 1000.0 + ((i * 37) % 9000) as f64;
            let late = if delay > 15.0 && reliability < 0.6 { 1.0 } else { 0.0 };
            dataset
                .push([amount, delay, (i % 12) as f64, 30.0, (i % 4) as f64, reliability], late)
                .unwrap();
        }
        dataset
    }

    fn small_params() -> BoosterParams {
        BoosterParams {
            n_estimators: 30,
            max_depth: 3,
            learning_rate: 0.3,
            seed: 7,
            ..Default::default()
        }
    }

    #[test]
    fn test_fit_learns_signal() {
        let dataset = synthetic_dataset(300);
        let model = GradientBoostedClassifier::fit(&dataset, small_params()).unwrap();

        assert_eq!(model.n_trees(), 30);

        let risky = [5000.0, 25.0, 3.0, 30.0, 1.0, 0.2];
        let safe = [5000.0, 2.0, 3.0, 30.0, 1.0, 0.9];
        assert!(model.predict_proba(&risky) > 0.7);
        assert!(model.predict_proba(&safe) < 0.3);
    }

    #[test]
    fn test_probabilities_in_unit_interval() {
        let dataset = synthetic_dataset(200);
        let model = GradientBoostedClassifier::fit(&dataset, small_params()).unwrap();

        let extremes = [
            [0.0; FEATURE_COUNT],
            [1e12, 1e6, 1e6, 1e6, 1e3, 1.0],
            [-1e12, -1e6, -1e6, -1e6, -1e3, -1.0],
        ];
        for p in model.predict_proba_batch(&extremes) {
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_fit_is_deterministic_with_sampling() {
        let dataset = synthetic_dataset(150);
        let params = BoosterParams {
            subsample: 0.8,
            colsample_bytree: 0.5,
            ..small_params()
        };

        let a = GradientBoostedClassifier::fit(&dataset, params.clone()).unwrap();
        let b = GradientBoostedClassifier::fit(&dataset, params).unwrap();
        assert_eq!(a.trees, b.trees);
    }

    #[test]
    fn test_feature_importance_counts_splits() {
        let dataset = synthetic_dataset(300);
        let model = GradientBoostedClassifier::fit(&dataset, small_params()).unwrap();
        let importance = model.feature_importance();

        assert!(importance.contains_key("avg_delay_days"));
        assert!(importance.contains_key("reliability_score"));
        // Constant column never splits
        assert!(!importance.contains_key("invoice_gap_days"));

        let total_splits: usize = model
            .trees
            .iter()
            .map(|t| t.nodes().iter().filter(|n| matches!(n, crate::gbdt::Node::Split { .. })).count())
            .sum();
        assert_eq!(importance.values().sum::<usize>(), total_splits);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dataset = synthetic_dataset(100);
        let model = GradientBoostedClassifier::fit(&dataset, small_params()).unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("model.json");
        model.save(&path).unwrap();

        let loaded = GradientBoostedClassifier::load(&path).unwrap();
        let row = [4200.0, 12.0, 5.0, 30.0, 2.0, 0.5];
        assert_eq!(loaded.predict_proba(&row), model.predict_proba(&row));
        assert_eq!(loaded.metadata().training_rows, 100);
    }

    #[test]
    fn test_load_rejects_foreign_layout() {
        let dataset = synthetic_dataset(50);
        let mut model = GradientBoostedClassifier::fit(&dataset, small_params()).unwrap();
        model.feature_names[0] = "amount_usd".to_string();

        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        model.save(&path).unwrap();

        let err = GradientBoostedClassifier::load(&path).unwrap_err();
        assert!(matches!(err, ModelError::CorruptModel(_)));
    }

    #[test]
    fn test_adjacent_float_values_still_separate() {
        let lo = 1.0_f64;
        let hi = f64::from_bits(lo.to_bits() + 1);
        let mut dataset = Dataset::new();
        for i in 0..40 {
            let (x, late) = if i % 2 == 0 { (lo, 0.0) } else { (hi, 1.0) };
            dataset.push([x, 0.0, 0.0, 0.0, 0.0, 0.0], late).unwrap();
        }

        for reg_lambda in [1.0, 0.0] {
            let params = BoosterParams {
                n_estimators: 5,
                max_depth: 1,
                reg_lambda,
                min_child_weight: 0.0,
                ..Default::default()
            };
            let model = GradientBoostedClassifier::fit(&dataset, params).unwrap();

            let p_lo = model.predict_proba(&[lo, 0.0, 0.0, 0.0, 0.0, 0.0]);
            let p_hi = model.predict_proba(&[hi, 0.0, 0.0, 0.0, 0.0, 0.0]);
            assert!((0.0..=1.0).contains(&p_lo), "lambda {}: {}", reg_lambda, p_lo);
            assert!((0.0..=1.0).contains(&p_hi), "lambda {}: {}", reg_lambda, p_hi);
            assert!(p_lo < 0.5 && p_hi > 0.5, "lambda {}: {} / {}", reg_lambda, p_lo, p_hi);
            assert_eq!(model.feature_importance().get("invoice_amount"), Some(&5));
        }
    }

    #[test]
    fn test_fit_rejects_empty_dataset() {
        let err = GradientBoostedClassifier::fit(&Dataset::new(), small_params()).unwrap_err();
        assert!(matches!(err, ModelError::EmptyDataset));
    }
}
